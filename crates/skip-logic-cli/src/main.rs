fn main() -> anyhow::Result<()> {
    skip_logic_cli::cli::main()
}
