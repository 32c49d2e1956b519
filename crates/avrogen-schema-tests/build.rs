fn main() -> Result<(), Box<dyn std::error::Error>> {
    avrogen_build::build!("avrogen.toml")?;

    Ok(())
}
