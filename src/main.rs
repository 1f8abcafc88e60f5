fn main() {
    rock_drift::game::run();
}
