use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use workout_core::platform::WORKOUT_SERVICE_ENDPOINT;
use workout_core::*;

#[derive(Parser)]
#[command(name = "gwc")]
#[command(about = "Workout description compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a workout description into a workout-service payload
    Compile {
        /// Workout JSON file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Treat input as raw text from the generation service
        #[arg(long)]
        generated: bool,

        /// Print compact JSON regardless of config
        #[arg(long)]
        compact: bool,

        /// Print a readable step tree instead of JSON
        #[arg(long)]
        summary: bool,

        /// Append the payload to the outbox for upload
        #[arg(long)]
        enqueue: bool,
    },

    /// List built-in example workouts
    Examples,

    /// Print a built-in example workout
    Example {
        name: String,

        /// Print the compiled payload instead of the description
        #[arg(long)]
        compile: bool,
    },

    /// Print the prompt sent to the generation service
    Prompt {
        description: String,

        /// Print the full request body instead of the prompt text
        #[arg(long)]
        request: bool,
    },

    /// List payloads queued in the outbox
    Outbox,
}

fn main() -> Result<()> {
    // Initialize logging
    workout_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Compile {
            file,
            generated,
            compact,
            summary,
            enqueue,
        } => cmd_compile(
            file.as_deref(),
            generated,
            !compact && config.output.pretty,
            summary,
            enqueue.then_some(data_dir.as_path()),
            &config,
        ),
        Commands::Examples => {
            for name in example_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Example { name, compile } => {
            cmd_example(&name, compile, config.output.pretty)
        }
        Commands::Prompt {
            description,
            request,
        } => {
            if request {
                let body = generation_request(&description, &config.generation);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", build_prompt(&description));
            }
            Ok(())
        }
        Commands::Outbox => cmd_outbox(&data_dir),
    }
}

fn cmd_compile(
    file: Option<&Path>,
    generated: bool,
    pretty: bool,
    summary: bool,
    outbox_dir: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let text = read_input(file)?;
    let options = config.compiler.compile_options();

    let payload = if generated {
        compile_generated(&text, &options)?
    } else {
        let spec: WorkoutSpec = serde_json::from_str(&text)
            .map_err(|e| Error::MalformedInput(e.to_string()))?;
        compile_with(&spec, &options)?
    };
    tracing::debug!(
        "Compiled workout '{}': {} top-level steps, ~{:.0}s",
        payload.workout_name,
        payload.steps().len(),
        payload.estimated_duration_in_secs
    );

    if summary {
        display_summary(&payload);
    } else {
        print_json(&payload, pretty)?;
    }

    if let Some(dir) = outbox_dir {
        let entry = OutboxEntry::new(&payload)?;
        let mut outbox = JsonlOutbox::new(Config::outbox_path(dir));
        outbox.append(&entry)?;
        eprintln!(
            "✓ Queued '{}' for {} ({})",
            payload.workout_name,
            WORKOUT_SERVICE_ENDPOINT,
            entry.id
        );
    }

    Ok(())
}

fn cmd_example(name: &str, compile: bool, pretty: bool) -> Result<()> {
    let spec = get_example(name).ok_or_else(|| {
        Error::Config(format!(
            "Unknown example '{}'. Available: {}",
            name,
            example_names().join(", ")
        ))
    })?;

    if compile {
        print_json(&workout_core::compile(spec)?, pretty)
    } else {
        print_json(spec, pretty)
    }
}

fn cmd_outbox(data_dir: &Path) -> Result<()> {
    let path = Config::outbox_path(data_dir);
    let entries = read_outbox(&path)?;

    if entries.is_empty() {
        println!("Outbox is empty.");
        return Ok(());
    }

    println!("{} queued payload(s) in {}", entries.len(), path.display());
    for entry in entries {
        println!(
            "  {}  {}  {}  ~{} min",
            entry.queued_at.format("%Y-%m-%d %H:%M"),
            entry.id,
            entry.workout_name,
            (entry.estimated_duration_secs / 60.0).round()
        );
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn display_summary(payload: &WorkoutPayload) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} WORKOUT", payload.sport_type.sport_type_key.to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", payload.workout_name);
    println!(
        "  Estimated: ~{:.0} seconds ({:.0} min)",
        payload.estimated_duration_in_secs,
        payload.estimated_duration_in_secs / 60.0
    );
    println!();

    for step in payload.steps() {
        display_step(step, 1);
    }

    println!();
}

fn display_step(step: &CompiledStep, depth: usize) {
    let indent = "  ".repeat(depth);
    match step {
        CompiledStep::Executable(step) => {
            let end = match step.preferred_end_condition_unit {
                Some(_) => format!("{} m", step.end_condition_value),
                None => format!("{} s", step.end_condition_value),
            };
            let target = match (step.target_value_one, step.target_value_two) {
                (Some(one), Some(two)) => format!(
                    " @ {} {:.2}–{:.2}",
                    step.target_type.workout_target_type_key, one, two
                ),
                _ => String::new(),
            };
            println!(
                "{}{}. {} → {}{}",
                indent, step.step_order, step.step_type.step_type_key, end, target
            );
        }
        CompiledStep::Repeat(group) => {
            println!(
                "{}{}. repeat × {}",
                indent, group.step_order, group.number_of_iterations
            );
            for child in &group.workout_steps {
                display_step(child, depth + 1);
            }
        }
    }
}
