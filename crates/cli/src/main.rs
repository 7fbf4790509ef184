fn main() -> Result<(), Box<dyn std::error::Error>> {
    grail_cli::run()
}
