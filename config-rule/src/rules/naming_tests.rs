use super::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("first", "First")]
#[case("hello-world", "HelloDashworld")]
#[case("hello_world", "HelloUnderscoreworld")]
#[case("check-s3_buckets", "CheckDashs3Underscorebuckets")]
#[case("", "")]
fn test_normalized_function_name(#[case] function: &str, #[case] expected: &str) {
    assert_eq!(expected, ServerlessNaming.normalized_function_name(function));
}

#[rstest]
#[case("elasticbeanstalk-platform-version", "Elasticbeanstalkplatformversion")]
#[case("s3_bucket.versioning!", "S3bucketversioning")]
#[case("-!-", "")]
fn test_normalize_alphanumeric(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(expected, ServerlessNaming.normalize_alphanumeric(name));
}

#[test]
fn test_logical_ids() {
    let naming = ServerlessNaming;
    assert_eq!("FirstLambdaFunction", naming.lambda_logical_id("first"));
    assert_eq!("FirstConfigRule", naming.config_rule_logical_id("first", ""));
    assert_eq!(
        "FirstLambdaPermissionS3versioning",
        naming.lambda_permission_logical_id("first", "S3versioning")
    );
    assert_eq!(
        "MyDashfnConfigRule2",
        naming.config_rule_logical_id("my-fn", "2")
    );
}

#[test]
fn test_normalize_name_keeps_the_tail() {
    assert_eq!("ÉtatFinal", normalize_name("étatFinal"));
    assert_eq!("A", normalize_name("a"));
}
