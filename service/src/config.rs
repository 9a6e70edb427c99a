use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

/// Default base URL of the generative language API used when
/// `GEMINI_BASE_URL` is not set.
/// Override in tests to point at a mock server.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Placeholder substring the transcript URL template must carry. It is
/// replaced with the URL-encoded video ID on every transcript request.
pub const VIDEO_ID_PLACEHOLDER: &str = "{videoId}";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs allowed to receive server responses,
    /// or `*` to allow any origin.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,

    /// The API key to use when calling the RapidAPI transcript provider.
    #[arg(long, env)]
    rapidapi_key: Option<String>,

    /// The `x-rapidapi-host` header value of the transcript provider.
    #[arg(long, env)]
    rapidapi_host: Option<String>,

    /// URL template for transcript lookups.
    /// Use `{videoId}` as a placeholder for the video ID.
    #[arg(long, env)]
    rapidapi_url: Option<String>,

    /// The API key to use when calling the generative language API.
    #[arg(long, env)]
    gemini_api_key: Option<String>,

    /// The base URL of the generative language API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// The model used to generate video summaries.
    #[arg(long, env, default_value = "gemini-2.5-flash")]
    gemini_model: String,

    /// Directory the bundled single-page app is served from.
    #[arg(long, env, default_value = "./public")]
    static_dir: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 5173)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set when a managed hosting platform drives the router directly;
    /// disables local port binding.
    #[arg(
        long,
        env,
        action = clap::ArgAction::Set,
        default_value_t = false,
        value_parser = clap::builder::BoolishValueParser::new(),
    )]
    managed_runtime: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Checks that every required configuration value is present and
    /// non-empty, reporting all missing names at once rather than the first.
    pub fn validate_required(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if is_unset(&self.rapidapi_key) {
            missing.push("RAPIDAPI_KEY");
        }
        if is_unset(&self.rapidapi_host) {
            missing.push("RAPIDAPI_HOST");
        }
        if is_unset(&self.rapidapi_url) {
            missing.push("RAPIDAPI_URL");
        }
        if is_unset(&self.gemini_api_key) {
            missing.push("GEMINI_API_KEY");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ))
        }
    }

    /// Returns the RapidAPI key, if configured.
    pub fn rapidapi_key(&self) -> Option<String> {
        self.rapidapi_key.clone()
    }

    /// Returns the RapidAPI host header value, if configured.
    pub fn rapidapi_host(&self) -> Option<String> {
        self.rapidapi_host.clone()
    }

    /// Returns the transcript URL template, if configured.
    pub fn rapidapi_url(&self) -> Option<String> {
        self.rapidapi_url.clone()
    }

    /// Returns the generative language API key, if configured.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key.clone()
    }

    /// Returns the generative language API base URL.
    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }

    /// Returns the model used for summary generation.
    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }

    /// Returns the directory the single-page app is served from.
    pub fn static_dir(&self) -> &str {
        &self.static_dir
    }

    pub fn managed_runtime(&self) -> bool {
        self.managed_runtime
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
