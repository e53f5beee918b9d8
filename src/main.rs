use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    playdeck::app::run_with_startup(playdeck::app::AppStartupOptions {
        playlist_file: args.file,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--file" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--file requires a playlist path");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--file cannot be empty");
                }
                out.file = Some(PathBuf::from(value.trim()));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("Playdeck");
    println!("  --file <path>     Playlist file to load at startup");
    println!("  Interactive commands: type `help` at the prompt");
}
