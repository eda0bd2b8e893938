use anyhow::Context;
use othello_ai::core::{parse_position, write_move};
use othello_ai::player::ai::AIConfig;
use std::env;
use std::fs::File;
use std::io::BufWriter;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: othello-ai <input> <output> [ai_config.json]");
        std::process::exit(2);
    }
    let (input_path, output_path) = (&args[1], &args[2]);

    let config = match args.get(3) {
        Some(path) => AIConfig::load(path).with_context(|| format!("loading config {}", path))?,
        None => AIConfig::default(),
    };

    let input = std::fs::read_to_string(input_path)
        .with_context(|| format!("reading position {}", input_path))?;
    let snapshot =
        parse_position(&input).with_context(|| format!("parsing position {}", input_path))?;

    let decision = othello_ai::decide(&snapshot, &config)?;

    let file = File::create(output_path).with_context(|| format!("creating {}", output_path))?;
    let mut out = BufWriter::new(file);
    write_move(&mut out, decision.best_move)
        .with_context(|| format!("writing move to {}", output_path))?;
    Ok(())
}
