// Native binary entry point for the waveform generator

#[cfg(feature = "crossterm")]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use wavegen::cli::Cli;

    let cli = Cli::parse();
    wavegen::utils::init_logger();
    wavegen::controller::run(&cli)
}

#[cfg(not(feature = "crossterm"))]
fn main() {
    println!("This binary is only available with the 'crossterm' feature enabled.");
}
