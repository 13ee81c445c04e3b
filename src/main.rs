fn main() -> anyhow::Result<()> {
    botanix::cli::run()
}
