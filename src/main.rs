fn main() {
    testbuilder::cli::run();
}
