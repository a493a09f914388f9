use serde::Serialize;
use serde_json::Value;

use crate::rules::events::{ConfigEvent, MaximumExecutionFrequency, MessageType};
use crate::rules::Result;

pub const CONFIG_RULE_TYPE: &str = "AWS::Config::ConfigRule";
pub const LAMBDA_PERMISSION_TYPE: &str = "AWS::Lambda::Permission";
pub const CUSTOM_LAMBDA_OWNER: &str = "CUSTOM_LAMBDA";
pub const CONFIG_EVENT_SOURCE: &str = "aws.config";
pub const CONFIG_PRINCIPAL: &str = "config.amazonaws.com";
pub const INVOKE_FUNCTION_ACTION: &str = "lambda:InvokeFunction";
pub const CONFIG_RULE_ACTIONS: [&str; 2] =
    ["config:GetResourceConfigHistory", "config:PutEvaluations"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceDeclaration<P, D> {
    #[serde(rename = "Type")]
    kind: &'static str,
    properties: P,
    depends_on: D,
}

#[derive(Debug, Serialize)]
struct GetAtt<'a> {
    #[serde(rename = "Fn::GetAtt")]
    get_att: [&'a str; 2],
}

impl<'a> GetAtt<'a> {
    fn arn(logical_id: &'a str) -> Self {
        GetAtt {
            get_att: [logical_id, "Arn"],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigRuleProperties<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_rule_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope<'a>>,
    source: Source<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Scope<'a> {
    compliance_resource_types: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Source<'a> {
    owner: &'static str,
    source_identifier: GetAtt<'a>,
    source_details: [SourceDetail; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SourceDetail {
    event_source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_execution_frequency: Option<MaximumExecutionFrequency>,
    message_type: MessageType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LambdaPermissionProperties<'a> {
    function_name: GetAtt<'a>,
    action: &'static str,
    principal: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyStatement {
    effect: &'static str,
    action: [&'static str; 2],
    resource: &'static str,
}

/// `AWS::Config::ConfigRule` invoking the function, depending on the function
/// and on the permission that lets AWS Config call it.
pub(crate) fn config_rule(
    event: &ConfigEvent,
    function_logical_id: &str,
    permission_logical_id: &str,
) -> Result<Value> {
    let declaration = ResourceDeclaration {
        kind: CONFIG_RULE_TYPE,
        properties: ConfigRuleProperties {
            config_rule_name: event.config_rule_name(),
            description: event.description.as_deref(),
            scope: event
                .resource_types
                .as_deref()
                .map(|resource_types| Scope {
                    compliance_resource_types: resource_types,
                }),
            source: Source {
                owner: CUSTOM_LAMBDA_OWNER,
                source_identifier: GetAtt::arn(function_logical_id),
                source_details: [SourceDetail {
                    event_source: CONFIG_EVENT_SOURCE,
                    maximum_execution_frequency: event.effective_frequency(),
                    message_type: event.message_type,
                }],
            },
        },
        depends_on: [function_logical_id, permission_logical_id],
    };

    Ok(serde_json::to_value(declaration)?)
}

pub(crate) fn lambda_permission(function_logical_id: &str) -> Result<Value> {
    let declaration = ResourceDeclaration {
        kind: LAMBDA_PERMISSION_TYPE,
        properties: LambdaPermissionProperties {
            function_name: GetAtt::arn(function_logical_id),
            action: INVOKE_FUNCTION_ACTION,
            principal: CONFIG_PRINCIPAL,
        },
        depends_on: function_logical_id,
    };

    Ok(serde_json::to_value(declaration)?)
}

/// Statement granting the execution role what custom config rules need.
pub(crate) fn config_rule_statement() -> Result<Value> {
    Ok(serde_json::to_value(PolicyStatement {
        effect: "Allow",
        action: CONFIG_RULE_ACTIONS,
        resource: "*",
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_config_rule_with_every_property() {
        let event = ConfigEvent {
            rule_name: Some(String::from("s3-bucket-versioning")),
            name: None,
            description: Some(String::from("Buckets must be versioned")),
            message_type: MessageType::ConfigurationItemChangeNotification,
            max_execution_frequency: Some(MaximumExecutionFrequency::SixHours),
            resource_types: Some(vec![
                String::from("AWS::S3::Bucket"),
                String::from("AWS::S3::BucketPolicy"),
            ]),
        };

        let rule = config_rule(&event, "CheckLambdaFunction", "CheckLambdaPermission").unwrap();

        assert_eq!(
            json!({
                "Type": "AWS::Config::ConfigRule",
                "Properties": {
                    "ConfigRuleName": "s3-bucket-versioning",
                    "Description": "Buckets must be versioned",
                    "Scope": {
                        "ComplianceResourceTypes": ["AWS::S3::Bucket", "AWS::S3::BucketPolicy"]
                    },
                    "Source": {
                        "Owner": "CUSTOM_LAMBDA",
                        "SourceIdentifier": { "Fn::GetAtt": ["CheckLambdaFunction", "Arn"] },
                        "SourceDetails": [{
                            "EventSource": "aws.config",
                            "MaximumExecutionFrequency": "Six_Hours",
                            "MessageType": "ConfigurationItemChangeNotification"
                        }]
                    }
                },
                "DependsOn": ["CheckLambdaFunction", "CheckLambdaPermission"]
            }),
            rule
        );
    }

    #[test]
    fn test_config_rule_omits_absent_properties() {
        let event = ConfigEvent {
            message_type: MessageType::ScheduledNotification,
            ..ConfigEvent::default()
        };

        let rule = config_rule(&event, "FirstLambdaFunction", "FirstLambdaPermission").unwrap();
        let properties = rule["Properties"].as_object().unwrap();

        assert!(!properties.contains_key("ConfigRuleName"));
        assert!(!properties.contains_key("Description"));
        assert!(!properties.contains_key("Scope"));
        assert_eq!(
            json!([{
                "EventSource": "aws.config",
                "MaximumExecutionFrequency": "TwentyFour_Hours",
                "MessageType": "ScheduledNotification"
            }]),
            properties["Source"]["SourceDetails"]
        );
    }

    #[test]
    fn test_config_rule_escapes_quotes_in_values() {
        let event = ConfigEvent {
            rule_name: Some(String::from(r#"say "hi""#)),
            description: Some(String::from(r#"{"nested": true}"#)),
            message_type: MessageType::ScheduledNotification,
            ..ConfigEvent::default()
        };

        let rule = config_rule(&event, "FirstLambdaFunction", "FirstLambdaPermission").unwrap();

        assert_eq!(json!(r#"say "hi""#), rule["Properties"]["ConfigRuleName"]);
        assert_eq!(json!(r#"{"nested": true}"#), rule["Properties"]["Description"]);
    }

    #[test]
    fn test_lambda_permission() {
        assert_eq!(
            json!({
                "Type": "AWS::Lambda::Permission",
                "Properties": {
                    "FunctionName": { "Fn::GetAtt": ["FirstLambdaFunction", "Arn"] },
                    "Action": "lambda:InvokeFunction",
                    "Principal": "config.amazonaws.com"
                },
                "DependsOn": "FirstLambdaFunction"
            }),
            lambda_permission("FirstLambdaFunction").unwrap()
        );
    }

    #[test]
    fn test_config_rule_statement() {
        assert_eq!(
            json!({
                "Effect": "Allow",
                "Action": ["config:GetResourceConfigHistory", "config:PutEvaluations"],
                "Resource": "*"
            }),
            config_rule_statement().unwrap()
        );
    }
}
