use stockboard::cli;

fn main() {
    cli::run();
}
