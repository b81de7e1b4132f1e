use clap::builder::RangedU64ValueParser;
use clap::Parser;
use log::{debug, error, info};
use randword::{
    affix::StandaloneConvention,
    config::{Config, ConfigStore, FileConfigStore},
    flag_set, WordGenConfig, WordGenerator,
};
use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
    process,
};

/// random word generator using hunspell dictionaries
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "randword",
    version,
    about,
    long_about = "Picks random words from a hunspell dictionary and applies a random valid combination of its affix rules to each one."
)]
pub struct Cli {
    /// number of words to display
    #[clap(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    numwords: Option<usize>,

    /// separator between words (a bare flag means no separator)
    #[clap(short = 's', long = "separator", num_args = 0..=1, default_missing_value = "")]
    separator: Option<String>,

    /// affix flags to ignore (a bare flag means ignore nothing)
    #[clap(short = 'i', long, num_args = 0..=1, default_missing_value = "")]
    ignore: Option<String>,

    /// dictionary file to use for word selection
    #[clap(short = 'd', long, value_parser = existing_file)]
    dictfile: Option<PathBuf>,

    /// affix file to use for generating word variants
    #[clap(short = 'a', long, value_parser = existing_file)]
    affixfile: Option<PathBuf>,

    /// seed the random number generator for reproducible output
    #[clap(long)]
    seed: Option<u64>,

    /// print every form of each sampled word instead of picking one
    #[clap(long)]
    all_forms: bool,

    /// where standalone affix rules are attached
    #[clap(long, value_enum)]
    convention: Option<StandaloneConvention>,

    /// fail on malformed affix blocks instead of skipping them
    #[clap(long)]
    strict_affixes: bool,

    /// accept dictionaries without a leading word count
    #[clap(long)]
    no_count_header: bool,

    /// log level (trace, debug, info, warn, error)
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

/// Settings after merging command line flags over the stored config
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub config: Config,
    pub dictfile: PathBuf,
    pub affixfile: PathBuf,
    pub seed: Option<u64>,
    pub all_forms: bool,
}

impl Cli {
    fn to_runtime_settings(&self, stored: Config) -> RuntimeSettings {
        let mut config = stored;
        if let Some(n) = self.numwords {
            config.number_of_words = n;
        }
        if let Some(ref sep) = self.separator {
            config.separator = sep.clone();
        }
        if let Some(ref ignore) = self.ignore {
            config.ignore = ignore.clone();
        }
        if let Some(convention) = self.convention {
            config.convention = convention;
        }
        if self.strict_affixes {
            config.strict_affixes = true;
        }
        if self.no_count_header {
            config.require_count_header = false;
        }

        RuntimeSettings {
            dictfile: self
                .dictfile
                .clone()
                .unwrap_or_else(|| config.dictionary_file()),
            affixfile: self
                .affixfile
                .clone()
                .unwrap_or_else(|| config.affix_file()),
            seed: self.seed,
            all_forms: self.all_forms,
            config,
        }
    }
}

impl RuntimeSettings {
    fn to_word_gen_config(&self) -> WordGenConfig {
        WordGenConfig {
            convention: self.config.convention,
            seed: self.seed,
            strict_affixes: self.config.strict_affixes,
            require_count_header: self.config.require_count_header,
        }
    }
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("Filename is invalid: {value}"))
    }
}

fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level.parse().unwrap_or(log::LevelFilter::Warn));
    builder.target(env_logger::Target::Stderr);
    builder.init();
}

fn run(settings: &RuntimeSettings) -> Result<(), Box<dyn Error>> {
    let mut generator = WordGenerator::from_files(
        &settings.dictfile,
        &settings.affixfile,
        settings.to_word_gen_config(),
    )?;
    debug!("loaded {} affix rules", generator.rules().len());

    let config = &settings.config;
    let ignore = flag_set(&config.ignore);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if settings.all_forms {
        let forms = generator.generate_all_forms(config.number_of_words, &ignore)?;
        for word_forms in forms {
            writeln!(out, "{}", word_forms.join(config.separator.as_str()))?;
        }
    } else {
        let line = generator.generate_line(config.number_of_words, &ignore, &config.separator)?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let store = FileConfigStore::new();
    let settings = cli.to_runtime_settings(store.load());
    info!(
        "using dictionary {} with affixes {}",
        settings.dictfile.display(),
        settings.affixfile.display()
    );

    if cli.save_config {
        match store.save(&settings.config) {
            Ok(()) => info!("saved settings to {}", store.path().display()),
            Err(e) => error!("could not save settings to {}: {e}", store.path().display()),
        }
    }

    if let Err(e) = run(&settings) {
        error!("{e}");
        eprintln!("randword: {e}");
        process::exit(1);
    }
}
