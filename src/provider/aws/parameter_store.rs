//! # AWS Parameter Store Client
//!
//! Client for reading values from AWS Systems Manager Parameter Store.
//!
//! This module provides functionality to:
//! - Get a single parameter by name (`GetParameter`)
//! - List a parameter hierarchy by path (`GetParametersByPath`), following `NextToken`
//!   until the subtree is exhausted or the caller's limit is reached
//!
//! SecureString values are always decrypted by the service (`WithDecryption=true`).

use super::load_sdk_config;
use crate::constants::PATH_PAGE_SIZE;
use crate::observability::metrics;
use crate::provider::{Parameter, ParameterStoreBackend, PathListing, StoreError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::Client as SsmClient;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

/// AWS Parameter Store backend
pub struct AwsParameterStore {
    client: SsmClient,
    endpoint_override: Option<String>,
}

impl std::fmt::Debug for AwsParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsParameterStore")
            .field("endpoint_override", &self.endpoint_override)
            .finish_non_exhaustive()
    }
}

impl AwsParameterStore {
    /// Create a new Parameter Store client
    ///
    /// `endpoint_override` redirects both lookup shapes to a local or test endpoint.
    pub async fn new(endpoint_override: Option<&str>) -> Self {
        let sdk_config = load_sdk_config(endpoint_override).await;
        Self::from_sdk_config(&sdk_config, endpoint_override)
    }

    /// Create a client from an already loaded SDK configuration
    #[must_use]
    pub fn from_sdk_config(sdk_config: &SdkConfig, endpoint_override: Option<&str>) -> Self {
        Self {
            client: SsmClient::new(sdk_config),
            endpoint_override: endpoint_override.map(ToString::to_string),
        }
    }

    async fn fetch_page(
        &self,
        path: &str,
        recursive: bool,
        page_size: usize,
        next_token: Option<String>,
    ) -> Result<(Vec<Parameter>, Option<String>), StoreError> {
        let response = self
            .client
            .get_parameters_by_path()
            .path(path)
            .with_decryption(true)
            .recursive(recursive)
            .max_results(i32::try_from(page_size).unwrap_or(i32::MAX))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    "GetParametersByPath failed for {}: {}",
                    path,
                    DisplayErrorContext(&e)
                );
                StoreError::Backend(describe_sdk_error(&e))
            })?;

        let parameters = response
            .parameters()
            .iter()
            .map(|p| into_parameter(p, path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((parameters, response.next_token().map(ToString::to_string)))
    }

    async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        limit: usize,
    ) -> Result<PathListing, StoreError> {
        let mut parameters = Vec::new();
        let mut next_token = None;

        loop {
            let remaining = limit.saturating_sub(parameters.len());
            if remaining == 0 {
                break;
            }
            let (page, token) = self
                .fetch_page(path, recursive, remaining.min(PATH_PAGE_SIZE), next_token)
                .await?;
            parameters.extend(page);
            next_token = token;
            if next_token.is_none() {
                return Ok(PathListing {
                    parameters,
                    truncated: false,
                });
            }
        }

        // Limit reached with a continuation token: the service may still hand out
        // empty pages, so read single entries until a parameter shows up or the token runs dry
        while let Some(token) = next_token.take() {
            let (page, token) = self.fetch_page(path, recursive, 1, Some(token)).await?;
            if !page.is_empty() {
                return Ok(PathListing {
                    parameters,
                    truncated: true,
                });
            }
            next_token = token;
        }

        Ok(PathListing {
            parameters,
            truncated: false,
        })
    }
}

/// Error code and service message of an SDK failure
///
/// Request ids, dates and the raw response are left out: the text ends up in
/// Secret annotations and must stay identical across retries of the same failure.
fn describe_sdk_error<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata,
{
    match (error.code(), error.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => error.to_string(),
    }
}

fn into_parameter(
    parameter: &aws_sdk_ssm::types::Parameter,
    requested: &str,
) -> Result<Parameter, StoreError> {
    match (parameter.name(), parameter.value()) {
        (Some(name), Some(value)) => Ok(Parameter::new(name, value)),
        _ => Err(StoreError::MalformedResponse(requested.to_string())),
    }
}

#[async_trait]
impl ParameterStoreBackend for AwsParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Parameter, StoreError> {
        let span = info_span!("ssm.get_parameter", parameter.name = name);
        let start = Instant::now();

        async move {
            info!("Fetching values from SSM Parameter Store by name: {}", name);
            let result = self
                .client
                .get_parameter()
                .name(name)
                .with_decryption(true)
                .send()
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    metrics::increment_backend_operation_errors("get_parameter");
                    let message = describe_sdk_error(&e);
                    if e.as_service_error()
                        .is_some_and(|se| se.is_parameter_not_found())
                    {
                        return Err(StoreError::NotFound(name.to_string()));
                    }
                    warn!("GetParameter failed for {}: {}", name, DisplayErrorContext(&e));
                    return Err(StoreError::Backend(message));
                }
            };

            metrics::record_backend_operation("get_parameter", start.elapsed().as_secs_f64());
            response
                .parameter()
                .ok_or_else(|| StoreError::MalformedResponse(name.to_string()))
                .and_then(|p| into_parameter(p, name))
        }
        .instrument(span)
        .await
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        limit: usize,
    ) -> Result<PathListing, StoreError> {
        let span = info_span!(
            "ssm.get_parameters_by_path",
            parameter.path = path,
            recursive = recursive
        );
        let start = Instant::now();

        async move {
            info!(
                "Fetching values from SSM Parameter Store by path: {} (recursive: {})",
                path, recursive
            );
            match self.list_by_path(path, recursive, limit).await {
                Ok(listing) => {
                    metrics::record_backend_operation(
                        "get_parameters_by_path",
                        start.elapsed().as_secs_f64(),
                    );
                    debug!(
                        "Path {} returned {} parameters (truncated: {})",
                        path,
                        listing.parameters.len(),
                        listing.truncated
                    );
                    Ok(listing)
                }
                Err(e) => {
                    metrics::increment_backend_operation_errors("get_parameters_by_path");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::error::ErrorMetadata;
    use aws_sdk_ssm::operation::get_parameter::GetParameterError;

    fn service_error(code: &str, message: Option<&str>) -> SdkError<GetParameterError, ()> {
        let mut meta = ErrorMetadata::builder().code(code);
        if let Some(message) = message {
            meta = meta.message(message);
        }
        SdkError::service_error(GetParameterError::generic(meta.build()), ())
    }

    #[test]
    fn test_describe_sdk_error_keeps_code_and_message() {
        let error = service_error(
            "AccessDeniedException",
            Some("User is not authorized to perform: ssm:GetParameter"),
        );
        assert_eq!(
            describe_sdk_error(&error),
            "AccessDeniedException: User is not authorized to perform: ssm:GetParameter"
        );
        assert_eq!(
            describe_sdk_error(&service_error("ThrottlingException", None)),
            "ThrottlingException"
        );
    }

    #[test]
    fn test_describe_sdk_error_without_metadata() {
        let error: SdkError<GetParameterError, ()> = SdkError::timeout_error("deadline elapsed");
        assert_eq!(describe_sdk_error(&error), "request has timed out");
    }

    #[test]
    fn test_into_parameter_requires_name_and_value() {
        let complete = aws_sdk_ssm::types::Parameter::builder()
            .name("/app/dev/db-host")
            .value("db.example.com")
            .build();
        assert_eq!(
            into_parameter(&complete, "/app/dev").unwrap(),
            Parameter::new("/app/dev/db-host", "db.example.com")
        );

        let no_value = aws_sdk_ssm::types::Parameter::builder()
            .name("/app/dev/db-host")
            .build();
        assert_eq!(
            into_parameter(&no_value, "/app/dev"),
            Err(StoreError::MalformedResponse("/app/dev".to_string()))
        );
    }
}
