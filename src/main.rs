//! Console front-end for the recording portal
//!
//! Thin UI collaborator: shows the current prompt, takes a speaker id and
//! recorded WAV files, and prints the controller's status and summary lines.
//!
//! ```text
//! voice-portal --prompts prompts.txt [--data-root data]
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use portal_lib::{
    CsvMetadataLog, JsonProgressStore, LocalRecordingStore, PortalError, ProgressTracker,
    PromptList, SessionController, WavFileSource,
};

#[derive(Parser)]
#[command(name = "voice-portal", about = "Spoken-sentence recording portal")]
struct Args {
    /// Text file with one prompt sentence per line
    #[arg(long)]
    prompts: PathBuf,

    /// Root directory for recordings, metadata, and progress
    #[arg(long, default_value = "data")]
    data_root: PathBuf,

    /// Progress document location (defaults to <data-root>/progress.json)
    #[arg(long)]
    progress_file: Option<PathBuf>,
}

fn main() {
    // Load .env file if present (for development convenience)
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), PortalError> {
    let prompts = PromptList::from_file(&args.prompts)?;
    log::info!("Loaded {} prompt(s) from {:?}", prompts.len(), args.prompts);

    let progress_path = args
        .progress_file
        .unwrap_or_else(|| args.data_root.join("progress.json"));
    let controller = SessionController::new(
        prompts,
        ProgressTracker::new(Box::new(JsonProgressStore::new(progress_path))),
        Box::new(LocalRecordingStore::new(&args.data_root)),
        Box::new(CsvMetadataLog::new(args.data_root.join("meta.csv"))),
    );

    console_loop(&controller)
}

/// Line-based session loop standing in for the web form.
fn console_loop(controller: &SessionController) -> Result<(), PortalError> {
    println!("Voice recording portal: {} prompts", controller.prompts().len());
    println!("Commands:");
    println!("  speaker <id>     set or change the volunteer id");
    println!("  submit <wav>     submit a recorded WAV file for the current prompt");
    println!("  quit");

    let mut speaker = String::new();
    let mut prompt_index = 0;
    show_prompt(controller, 0);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| PortalError::Storage(format!("stdout: {}", e)))?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| PortalError::Storage(format!("stdin: {}", e)))?;
        if read == 0 {
            return Ok(());
        }

        let line = line.trim();
        if line == "quit" {
            return Ok(());
        }

        if let Some(id) = line.strip_prefix("speaker ") {
            let state = controller.on_speaker_changed(id)?;
            speaker = id.trim().to_string();
            prompt_index = state.prompt_index;
            println!("Speaker '{}': completed {}/{}", speaker, state.completed, state.total);
            if state.all_complete {
                println!("All prompts recorded; further submissions re-record.");
            }
            show_prompt(controller, prompt_index);
        } else if let Some(path) = line.strip_prefix("submit ") {
            let source = WavFileSource::new(path.trim());
            match controller.on_submit(&speaker, prompt_index, Some(&source)) {
                Ok(result) => {
                    println!("{}", result.status);
                    println!("{} | {}", result.progress_summary, result.duration_summary);
                    if result.all_complete {
                        println!("All prompts recorded; further submissions re-record.");
                    }
                    prompt_index = result.prompt_index;
                    show_prompt(controller, prompt_index);
                }
                Err(e) if e.is_volunteer_facing() => {
                    println!("warning: {}", e);
                    show_prompt(controller, prompt_index);
                }
                Err(e) => return Err(e),
            }
        } else if !line.is_empty() {
            println!("unrecognized command: {}", line);
        }
    }
}

fn show_prompt(controller: &SessionController, index: usize) {
    if let Some(text) = controller.prompts().get(index) {
        println!("[{}] Read aloud: {}", index, text);
    }
}
