//! Command-line interface for rulekit

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use rulekit::{CardProvider, CardValidator, Error, StringValidator, Validate};

#[cfg(feature = "cli")]
const EXIT_INVALID: i32 = 1;
#[cfg(feature = "cli")]
const EXIT_USAGE: i32 = 2;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "rulekit")]
#[command(author, version, about = "Validate strings and payment cards from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a card number with the Luhn checksum and optional provider/expiration
    Card {
        /// Card number, digits only
        #[arg(value_name = "NUMBER")]
        number: String,

        /// Expected provider (visa, mastercard, amex, discover, jcb, diners, maestro, unionpay, naranja)
        #[arg(short, long)]
        provider: Option<String>,

        /// Expiration date as MM/YY
        #[arg(short, long)]
        expiration: Option<String>,

        /// Output errors as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check an MM/YY expiration date against today
    Expiration {
        /// Expiration date as MM/YY
        #[arg(value_name = "MM/YY")]
        date: String,
    },

    /// Check a string against a set of rules
    String {
        /// Value to check
        #[arg(value_name = "VALUE")]
        value: String,

        /// Minimum length in characters
        #[arg(long)]
        min_length: Option<usize>,

        /// Maximum length in characters
        #[arg(long)]
        max_length: Option<usize>,

        /// Exact length in characters
        #[arg(long)]
        fixed_length: Option<usize>,

        /// Require an email address
        #[arg(long)]
        email: bool,

        /// Require a URL
        #[arg(long)]
        url: bool,

        /// Reject whitespace
        #[arg(long)]
        no_whitespaces: bool,

        /// Require a digit
        #[arg(long)]
        require_number: bool,

        /// Require an uppercase letter
        #[arg(long)]
        require_uppercase: bool,

        /// Require a lowercase letter
        #[arg(long)]
        require_lowercase: bool,

        /// Require a special character
        #[arg(long)]
        require_special: bool,

        /// Output errors as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Card {
            number,
            provider,
            expiration,
            json,
        } => cmd_card(&number, provider.as_deref(), expiration.as_deref(), json),
        Commands::Expiration { date } => cmd_expiration(&date),
        Commands::String {
            value,
            min_length,
            max_length,
            fixed_length,
            email,
            url,
            no_whitespaces,
            require_number,
            require_uppercase,
            require_lowercase,
            require_special,
            json,
        } => {
            let rules = StringRules {
                min_length,
                max_length,
                fixed_length,
                email,
                url,
                no_whitespaces,
                require_number,
                require_uppercase,
                require_lowercase,
                require_special,
            };
            cmd_string(&value, &rules, json)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_card(
    number: &str,
    provider: Option<&str>,
    expiration: Option<&str>,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let provider = provider.map(str::parse::<CardProvider>).transpose()?;
    let errors = CardValidator::builder()
        .build()
        .check(number, provider, expiration);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&errors)?);
        return Ok(errors.is_empty());
    }

    if errors.is_empty() {
        println!("✓ Card is valid");
        return Ok(true);
    }

    println!("✗ Card is invalid");
    if let Some(message) = &errors.number {
        println!("  Number: {}", message);
    }
    if let Some(message) = &errors.expiration_date {
        println!("  Expiration: {}", message);
    }
    Ok(false)
}

#[cfg(feature = "cli")]
fn cmd_expiration(date: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match CardValidator::validate_expiration(date) {
        Ok(()) => {
            println!("✓ Expiration date is valid");
            Ok(true)
        }
        Err(Error::Validation(err)) => {
            println!("✗ {}", err);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(feature = "cli")]
struct StringRules {
    min_length: Option<usize>,
    max_length: Option<usize>,
    fixed_length: Option<usize>,
    email: bool,
    url: bool,
    no_whitespaces: bool,
    require_number: bool,
    require_uppercase: bool,
    require_lowercase: bool,
    require_special: bool,
}

#[cfg(feature = "cli")]
fn build_string_validator(rules: &StringRules) -> rulekit::Result<rulekit::StringValidator> {
    let mut builder = StringValidator::builder();

    if let Some(n) = rules.fixed_length {
        builder = builder.fixed_length(n)?;
    }
    if let Some(n) = rules.min_length {
        builder = builder.min_length(n)?;
    }
    if let Some(n) = rules.max_length {
        builder = builder.max_length(n)?;
    }
    if rules.email {
        builder = builder.is_email();
    }
    if rules.url {
        builder = builder.is_url(false);
    }
    if rules.no_whitespaces {
        builder = builder.no_whitespaces();
    }
    if rules.require_number {
        builder = builder.require_number()?;
    }
    if rules.require_uppercase {
        builder = builder.require_uppercase();
    }
    if rules.require_lowercase {
        builder = builder.require_lowercase();
    }
    if rules.require_special {
        builder = builder.require_special_character()?;
    }

    Ok(builder.build())
}

#[cfg(feature = "cli")]
fn cmd_string(
    value: &str,
    rules: &StringRules,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let validator = build_string_validator(rules)?;
    let messages = validator.get_error_messages(&serde_json::Value::String(value.to_string()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(messages.is_empty());
    }

    if messages.is_empty() {
        println!("✓ Value is valid");
        return Ok(true);
    }

    println!("✗ Value is invalid");
    for message in &messages {
        println!("  - {}", message);
    }
    Ok(false)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
