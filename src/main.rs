mod host;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    host::main()
}
