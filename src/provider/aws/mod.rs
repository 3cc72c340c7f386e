//! # AWS Providers
//!
//! SDK configuration shared by the AWS backends.
//!
//! By default the SDK's credential chain is used, which picks up IRSA
//! (IAM Roles for Service Accounts) on EKS, and the region comes from `AWS_REGION`.
//! When an endpoint override is configured (LocalStack or another test backend),
//! every call is sent there with static test credentials instead.

use crate::constants::{LOCAL_STACK_CREDENTIAL, LOCAL_STACK_REGION};
use aws_config::SdkConfig;
use aws_credential_types::Credentials;
use tracing::info;

/// Build the SDK configuration, honouring an optional endpoint override
pub async fn load_sdk_config(endpoint_override: Option<&str>) -> SdkConfig {
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    match endpoint_override {
        Some(endpoint) => {
            info!("Setup LocalStack AWS client with endpoint: {}", endpoint);
            loader
                .region(aws_config::Region::new(LOCAL_STACK_REGION))
                .endpoint_url(endpoint.trim_end_matches('/'))
                .credentials_provider(Credentials::new(
                    LOCAL_STACK_CREDENTIAL,
                    LOCAL_STACK_CREDENTIAL,
                    None,
                    None,
                    "local-stack",
                ))
                .load()
                .await
        }
        None => {
            info!("Using default AWS credential chain (IRSA when running on EKS)");
            loader.load().await
        }
    }
}

pub mod parameter_store;
pub use parameter_store::AwsParameterStore;
