fn main() {
    std::process::exit(gitmeta::app::startup::startup());
}
