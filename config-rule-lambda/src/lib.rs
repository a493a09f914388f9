// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use lambda_runtime::Error;
use log::{self, error, info};
use serde_derive::{Deserialize, Serialize};

fn default_as_empty() -> String {
    "".to_string()
}

#[derive(Deserialize, Debug)]
pub struct CustomEvent {
    #[serde(rename = "service")]
    pub service: String,
    #[serde(rename = "template")]
    pub template: String,
    #[serde(rename = "role", default)]
    pub role: Option<String>,
    #[serde(rename = "s3_output_bucket", default = "default_as_empty")]
    pub s3_output_bucket: String,
}

#[derive(Debug, Serialize)]
pub struct CustomOutput {
    pub message: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct FailureResponse {
    pub body: String,
}

// Implement Display for the Failure response so that we can then implement Error.
impl std::fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

// Implement Error for the FailureResponse so that we can `?` (try) the Response
// returned by `lambda_runtime::run(func).await` in `fn main`.
impl std::error::Error for FailureResponse {}

pub async fn upload_object_to_s3(
    client: &aws_sdk_s3::Client,
    bucket_name: &str,
    key: &str,
    b: &str,
) -> Result<(), Error> {
    client
        .put_object()
        .bucket(bucket_name)
        .key(key)
        .body(b.as_bytes().to_owned().into())
        .content_type("application/json")
        .send()
        .await
        .map_err(|err| {
            // In case of failure, log a detailed error to CloudWatch.
            error!(
                "failed to upload file '{}' to S3 with error: {}",
                &key, err
            );
            // The sender of the request receives this message in response.
            FailureResponse {
                body: "The lambda encountered an error and the compiled template was not saved"
                    .to_owned(),
            }
        })?;

    let s3_location = format!("s3://{}/{}", bucket_name, key);
    info!(
        "Successfully stored the compiled template in S3 with the name '{}'",
        &s3_location
    );

    Ok(())
}

/// Compiles the config events of the event's service definition into its
/// template. The template is returned inline, or stored in
/// `s3_output_bucket` when one is given.
pub async fn call_config_rule(e: CustomEvent) -> Result<CustomOutput, Error> {
    info!("Service definition is: [{}]", &e.service);
    info!("Template is: [{}]", &e.template);

    let compiled = config_rule::compile_config_rules(&e.service, &e.template, e.role.as_deref())
        .map_err(|err| {
            error!("failed to compile config events: {}", err);
            FailureResponse {
                body: err.to_string(),
            }
        })?;

    if e.s3_output_bucket.is_empty() {
        return Ok(CustomOutput { message: compiled });
    }

    // No extra configuration is needed as long as your Lambda has
    // the necessary permissions attached to its role.
    let config = aws_config::from_env().load().await;
    let client = aws_sdk_s3::Client::new(&config);

    // Generate a filename based on when the request was received.
    let filename = format!("{}.json", time::OffsetDateTime::now_utc().unix_timestamp());
    let body = serde_json::to_string(&compiled)?;

    upload_object_to_s3(&client, &e.s3_output_bucket, &filename, &body).await?;

    Ok(CustomOutput {
        message: serde_json::json!({
            "message": format!("Successfully stored the compiled template in S3 with the name '{}'", &filename)
        }),
    })
}
