use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::Level;

use ufenc::config::{Config, GENERATED_PASSWORD_LENGTH};
use ufenc::engine::{EncryptOptions, Engine};
use ufenc::file::File;
use ufenc::secret::Secret;
use ufenc::strength::{evaluate, generate_strong_password};
use ufenc::types::Processing;
use ufenc::ui::display::{show_generated_password, show_header, show_key_share, show_strength, show_success};
use ufenc::ui::progress::Bar;
use ufenc::ui::prompt::Prompt;

/// Room for the JSON header and tag on top of the plaintext ceiling.
const CONTAINER_OVERHEAD: u64 = bytesize::MIB;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file into a .ufenc container.
    Encrypt {
        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        /// Generate a strong password instead of asking for one.
        #[arg(long, conflicts_with = "password")]
        generate: bool,

        /// Refuse decryption after this many hours.
        #[arg(long)]
        expiry_hours: Option<u32>,

        /// PBKDF2 iteration count for this container.
        #[arg(long)]
        iterations: Option<u32>,

        /// Print the key share for out-of-band delivery.
        #[arg(long)]
        show_key_share: bool,
    },

    /// Decrypt a .ufenc container.
    Decrypt {
        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show a container's header without decrypting it.
    Inspect {
        #[arg(short, long)]
        input: String,
    },

    /// Score a password.
    Strength { password: Option<String> },

    /// Print a random strong password.
    Generate {
        #[arg(short, long, default_value_t = GENERATED_PASSWORD_LENGTH)]
        length: usize,
    },
}

#[derive(Parser)]
#[command(name = "ufenc", version, about = "Encrypt files into password-protected .ufenc containers using AES-256-GCM and PBKDF2-SHA256.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,

    /// Log each engine step to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl App {
    pub fn init() -> Result<Self> {
        let app = Self::parse();

        let level = if app.verbose { Level::DEBUG } else { Level::WARN };
        let subscriber = tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(app)
    }

    pub async fn execute(self) -> Result<()> {
        let engine = Engine::new(Config::default())?;
        let prompt = Prompt::new(engine.config().min_password_length);

        match self.command {
            Commands::Encrypt { input, output, password, generate, expiry_hours, iterations, show_key_share } => {
                let options = EncryptOptions { expiry_hours, iterations };
                Self::encrypt(engine, &prompt, EncryptArgs { input, output, password, generate, show_key_share }, options).await
            }
            Commands::Decrypt { input, output, password } => Self::decrypt(engine, &prompt, input, output, password).await,
            Commands::Inspect { input } => Self::inspect(engine, input).await,
            Commands::Strength { password } => Self::strength(password),
            Commands::Generate { length } => {
                let password = generate_strong_password(length)?;
                println!("{password}");
                Ok(())
            }
        }
    }

    async fn encrypt(engine: Engine, prompt: &Prompt, args: EncryptArgs, options: EncryptOptions) -> Result<()> {
        let input = File::new(&args.input);
        let data = input.read(engine.config().max_file_size).await?;

        let password = match args.password {
            Some(password) => Secret::from_string(password),
            None if args.generate => {
                let password = generate_strong_password(GENERATED_PASSWORD_LENGTH)?;
                show_generated_password(&password);
                Secret::from_string(password)
            }
            None => prompt.prompt_encryption_password()?,
        };

        let file_name = input.name();
        let bar = Bar::new(Processing::Encryption);
        let mut observer = bar.clone();
        let result = tokio::task::spawn_blocking(move || engine.encrypt(&file_name, &data, &password, options, &mut observer)).await;
        bar.finish();
        let sealed = result.context("encryption task failed")?.with_context(|| format!("{} failed: {}", Processing::Encryption, input.path().display()))?;

        let output = File::new(args.output.map_or_else(|| input.sibling(&sealed.file_name), PathBuf::from));
        if output.exists() && !prompt.confirm_file_overwrite(output.path())? {
            bail!("operation canceled");
        }
        output.write(&sealed.container).await?;

        show_success(Processing::Encryption.mode(), output.path());
        if args.show_key_share {
            show_key_share(&sealed.key_share);
        }

        Ok(())
    }

    async fn decrypt(engine: Engine, prompt: &Prompt, input: String, output: Option<String>, password: Option<String>) -> Result<()> {
        let input = File::new(&input);
        let data = input.read(engine.config().max_file_size.saturating_add(CONTAINER_OVERHEAD)).await?;

        if let Some(header) = engine.inspect(&data) {
            show_header(&header);
        }

        let password = match password {
            Some(password) => Secret::from_string(password),
            None => prompt.prompt_decryption_password()?,
        };

        let bar = Bar::new(Processing::Decryption);
        let mut observer = bar.clone();
        let result = tokio::task::spawn_blocking(move || engine.decrypt(&data, &password, &mut observer)).await;
        bar.finish();
        let opened = result.context("decryption task failed")?.with_context(|| format!("{} failed: {}", Processing::Decryption, input.path().display()))?;

        let output = File::new(output.map_or_else(|| input.sibling(&opened.file_name), PathBuf::from));
        if output.exists() && !prompt.confirm_file_overwrite(output.path())? {
            bail!("operation canceled");
        }
        output.write(&opened.data).await?;

        show_success(Processing::Decryption.mode(), output.path());

        Ok(())
    }

    async fn inspect(engine: Engine, input: String) -> Result<()> {
        let input = File::new(&input);
        let data = input.read(engine.config().max_file_size.saturating_add(CONTAINER_OVERHEAD)).await?;
        let header = engine.inspect(&data).with_context(|| format!("not a .ufenc file: {}", input.path().display()))?;

        show_header(&header);
        Ok(())
    }

    fn strength(password: Option<String>) -> Result<()> {
        let password = match password {
            Some(password) => Secret::from_string(password),
            None => Prompt::prompt_password("Password to evaluate:")?,
        };

        show_strength(&evaluate(password.expose_secret()));
        Ok(())
    }
}

struct EncryptArgs {
    input: String,
    output: Option<String>,
    password: Option<String>,
    generate: bool,
    show_key_share: bool,
}
