use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sqs::config::Credentials;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// AWS connection flags shared by every subcommand.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct Settings {
    /// Profile to use from ~/.aws/credentials
    #[arg(short, long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Region to use
    #[arg(short, long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Send requests to this endpoint instead of the regional AWS one
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Use LocalStack: static test credentials, us-east-1 and http://localhost:4566
    /// unless overridden
    #[arg(long, global = true)]
    pub local: bool,
}

impl Settings {
    /// Endpoint override, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match (&self.endpoint_url, self.local) {
            (Some(url), _) => Some(url.as_str()),
            (None, true) => Some(LOCALSTACK_ENDPOINT),
            (None, false) => None,
        }
    }

    pub async fn sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        match (&self.region, self.local) {
            (Some(region), _) => loader = loader.region(Region::new(region.clone())),
            (None, true) => loader = loader.region("us-east-1"),
            (None, false) => {}
        }

        if self.local {
            loader = loader.credentials_provider(Credentials::new(
                "test", "test", None, None, "static",
            ));
        }

        if let Some(endpoint) = self.endpoint() {
            loader = loader.endpoint_url(endpoint);
        }

        log::debug!("loading aws config: {:?}", self);
        loader.load().await
    }
}
