use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use deploy_defs::DeployError;

/// Map an SDK failure into the typed error the envelope layer understands,
/// carrying the upstream HTTP status when one was reported.
pub(crate) fn sdk_error<E>(what: &str, err: SdkError<E, HttpResponse>) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let code = err
        .raw_response()
        .map(|response| response.status().as_u16())
        .filter(|code| (300..600).contains(code))
        .unwrap_or(500);
    let message = match err.as_service_error() {
        Some(service_error) => format!("{}: {}", what, service_error),
        None => format!("{}: {}", what, err),
    };
    DeployError::Api { code, message }.into()
}
