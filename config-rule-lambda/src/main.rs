// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use config_rule_lambda::{call_config_rule, CustomEvent};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<(), Error> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    let func = service_fn(|event: LambdaEvent<CustomEvent>| call_config_rule(event.payload));
    lambda_runtime::run(func).await?;
    Ok(())
}
