use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slide_forms::generator::log_progress;
use slide_forms::render::{render_generator, render_result_panel};
use slide_forms::view::Banner;
use slide_forms::{
    Category, DesignForm, FileUpload, FsDraftStore, HttpTransport, Quality, SlideFormsError,
    SlideGeneratorBuilder, Transport, UploadController,
};

#[derive(Parser)]
#[command(name = "slide-forms", about = "Submit drafts and design files to a slide API")]
struct Cli {
    /// Base URL of the slide API server
    #[arg(long, env = "SLIDE_FORMS_BASE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Print the rendered HTML fragment instead of plain status lines
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate slides from the saved draft or a text file
    Generate {
        /// Replace the saved draft with this file's content first
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory holding the saved draft
        #[arg(long, env = "SLIDE_FORMS_DRAFT_DIR", default_value = ".slide-forms")]
        draft_dir: PathBuf,

        /// Download the generated file into this directory
        #[arg(long)]
        download_to: Option<PathBuf>,

        /// Request deadline in seconds
        #[arg(long, default_value_t = 300)]
        timeout_secs: u64,
    },
    /// Upload a design file
    Upload {
        file: PathBuf,

        #[arg(long, default_value = "general")]
        category: String,

        #[arg(long, default_value = "medium")]
        quality: Quality,
    },
    /// Generate slides through the upload page's content form
    Slides {
        input: PathBuf,

        #[arg(long)]
        design_preference: Option<String>,
    },
    /// Show the server health report
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slide_forms=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> slide_forms::Result<()> {
    let transport = HttpTransport::new(&cli.base_url)?;

    match cli.command {
        Command::Generate {
            input,
            draft_dir,
            download_to,
            timeout_secs,
        } => {
            let mut generator =
                SlideGeneratorBuilder::new(transport.clone(), FsDraftStore::new(draft_dir))
                    .timeout(Duration::from_secs(timeout_secs))
                    .build()?;

            if let Err(e) = generator.load().await {
                tracing::warn!("Could not restore draft: {e}");
            }
            if let Some(path) = input {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;
                generator.input(text).await;
            }

            let watcher = log_progress(generator.subscribe());

            let outcome = generator.generate().await;
            let view = generator.view();
            drop(generator);
            if let Err(e) = watcher.await {
                tracing::warn!("Progress watcher failed: {e}");
            }

            if cli.html {
                println!("{}", render_generator(&view)?);
            } else if let (Ok(_), Some(status)) = (&outcome, &view.status) {
                println!("{}", status.message);
            }

            let result = outcome?;
            println!("{}", result.download_url);
            if let Some(dir) = download_to {
                let path = transport
                    .download(&result.download_url, &dir, &result.filename)
                    .await?;
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Upload {
            file,
            category,
            quality,
        } => {
            let controller = UploadController::new(transport);
            let form = DesignForm {
                file: Some(FileUpload::from_path(&file).await?),
                category: Category::new(category),
                quality: Some(quality),
            };
            let outcome = controller.submit_design(form).await;
            print_panel(&controller, cli.html, outcome.is_ok())?;
            let receipt = outcome?;
            for uploaded in receipt.uploaded_files {
                println!("{}\t{}", uploaded.filename, uploaded.asset_id.unwrap_or_default());
            }
            Ok(())
        }
        Command::Slides {
            input,
            design_preference,
        } => {
            let mut controller = UploadController::new(transport);
            if let Some(preference) = design_preference {
                controller = controller.design_preference(preference);
            }
            let content = tokio::fs::read_to_string(&input)
                .await
                .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;
            let outcome = controller.submit_content(&content).await;
            print_panel(&controller, cli.html, outcome.is_ok())?;
            let receipt = outcome?;
            println!("{}", receipt.download_url);
            Ok(())
        }
        Command::Health => {
            let report = transport.health().await?;
            println!(
                "{} {} {}",
                report.status,
                report.version.unwrap_or_default(),
                report.timestamp.unwrap_or_default()
            );
            Ok(())
        }
    }
}

/// Errors are reported by `main`, so plain output only covers success.
fn print_panel<T: Transport>(
    controller: &UploadController<T>,
    html: bool,
    succeeded: bool,
) -> slide_forms::Result<()> {
    let panel = controller.panel();
    if html {
        println!("{}", render_result_panel(&panel)?);
    } else if let (true, Some(Banner::Success(message))) = (succeeded, panel.banner) {
        println!("{message}");
    }
    Ok(())
}
