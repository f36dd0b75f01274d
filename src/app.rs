use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, ArgGroup, Parser};
use tracing::{Level, debug};

use crate::cipher::{AesGcm, Key};
use crate::config::APP_NAME;
use crate::transform::Transformer;
use crate::types::{Options, ProcessorMode};
use crate::ui::display;
use crate::ui::progress::Bar;
use crate::walker::walk;

#[derive(Parser, Debug)]
#[command(
    name = APP_NAME,
    version,
    about = "Encrypt or decrypt a file or every file in a directory tree with AES-GCM.",
    group(ArgGroup::new("mode").required(true).args(["encrypt", "decrypt"]))
)]
pub struct App {
    /// Encryption key; padded with '0' or truncated to 16, 24 or 32 bytes.
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    key: String,

    /// Encrypt the file or directory.
    #[arg(short, long)]
    encrypt: bool,

    /// Decrypt the file or directory. Decrypted `.enc` files are always deleted.
    #[arg(short = 'x', long)]
    decrypt: bool,

    /// Delete the original file after encryption.
    #[arg(short = 'd', long = "delete-original", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    delete_original: bool,

    /// Log more (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// File or directory to process.
    path: PathBuf,
}

impl App {
    pub fn init() -> Result<Self> {
        let app = Self::parse();

        let level = match app.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        };

        let subscriber = tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(app)
    }

    pub async fn execute(self) -> Result<()> {
        let options = self.options();
        let key = Key::normalize(&self.key);

        let cipher = AesGcm::new(&key).context("cannot construct cipher")?;
        display::show_key(cipher.name(), self.key.len(), key.len());

        let metadata = tokio::fs::metadata(&self.path).await.with_context(|| format!("cannot stat {}", self.path.display()))?;
        let transformer = Transformer::new(key);

        if metadata.is_dir() {
            Self::run_tree(&self.path, &transformer, options).await
        } else {
            Self::run_file(&self.path, &transformer, options).await;
            Ok(())
        }
    }

    fn options(&self) -> Options {
        let mode = if self.encrypt { ProcessorMode::Encrypt } else { ProcessorMode::Decrypt };
        Options::new(mode, self.delete_original)
    }

    async fn run_file(path: &Path, transformer: &Transformer, options: Options) {
        debug!(path = %path.display(), mode = %options.mode, "processing single file");
        let outcome = transformer.transform(options.task(path)).await;
        display::show_outcome(&outcome);
    }

    async fn run_tree(root: &Path, transformer: &Transformer, options: Options) -> Result<()> {
        debug!(root = %root.display(), mode = %options.mode, "processing directory tree");
        let bar = Bar::new(options.mode.processing().label())?;

        let result = walk(root, transformer, options, |outcome| {
            bar.suspend(|| display::show_outcome(outcome));
            bar.add(1);
        })
        .await;

        bar.finish();

        // Per-file and traversal failures are reported, not turned into a
        // failing exit status.
        match result {
            Ok(summary) => display::show_summary(options.mode, &summary),
            Err(e) => display::show_walk_error(&e),
        }

        Ok(())
    }
}
