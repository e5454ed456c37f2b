mod health_check;
mod submit;

pub use health_check::check_health;
pub use submit::{submit, SubmissionData, SubmissionReceipt, SubmitError, SUCCESS_MESSAGE};

pub(crate) fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
