fn main() -> anyhow::Result<()> {
    gifos::cli::run()
}
