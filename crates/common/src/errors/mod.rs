//! Error chain helpers for user facing reports.

use crate::ipfs::{IpfsError, StatusCode};
use eyre::Chain;
use std::error::Error;

/// Returns the messages of `error` and its sources, dropping any cause whose message is
/// already part of the one wrapping it (`upload failed: 401; 401` -> `upload failed: 401`).
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes =
        Chain::new(error).map(|cause| cause.to_string().trim().to_string()).collect::<Vec<_>>();
    causes.dedup_by(|cause, outer| outer.contains(cause.as_str()));
    causes
}

/// Suggests which setting to check for errors caused by a misconfigured IPFS API.
pub fn config_hint(error: &(dyn Error + 'static)) -> Option<&'static str> {
    let mut ipfs_errors = Chain::new(error).filter_map(|err| err.downcast_ref::<IpfsError>());
    ipfs_errors.find_map(|err| match err {
        IpfsError::Upload { status, .. } | IpfsError::Fetch { status, .. }
            if matches!(*status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) =>
        {
            Some(
                "the IPFS API rejected the request; \
                 check MINTY_IPFS_API_KEY and MINTY_IPFS_API_SECRET",
            )
        }
        IpfsError::Http(err) if err.is_connect() => {
            Some("the IPFS API is unreachable; check MINTY_IPFS_API_URL")
        }
        IpfsError::InvalidUrl { .. } => Some("check MINTY_IPFS_API_URL"),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipfs::{ContentStore, IpfsClient};
    use eyre::WrapErr;

    fn wrapped(err: IpfsError, context: &'static str) -> eyre::Report {
        Err::<(), _>(err).wrap_err(context).unwrap_err()
    }

    #[test]
    fn dedups_contained() {
        #[derive(thiserror::Error, Debug)]
        #[error("failed to pin asset: {0}")]
        struct Pin(#[from] Cid);

        #[derive(thiserror::Error, Debug)]
        #[error("{0}")]
        struct Cid(String);

        let report = eyre::Report::from(Pin(Cid("unknown cid".into())));
        assert_eq!(report.chain().count(), 2, "{report:?}");
        assert_eq!(dedup_chain(&*report), ["failed to pin asset: unknown cid"]);
    }

    #[test]
    fn keeps_distinct_context() {
        let report = wrapped(IpfsError::EmptyResponse, "failed to upload asset");
        assert_eq!(
            dedup_chain(&*report),
            ["failed to upload asset", "IPFS API returned an empty response"]
        );
        assert_eq!(config_hint(&*report), None);
    }

    #[test]
    fn hints_at_credentials() {
        let err = IpfsError::Upload { status: StatusCode::UNAUTHORIZED, body: String::new() };
        let report = wrapped(err, "failed to upload asset");
        let hint = config_hint(&*report).unwrap();
        assert!(hint.contains("MINTY_IPFS_API_KEY"), "{hint}");

        let err = IpfsError::Fetch { status: StatusCode::NOT_FOUND, body: String::new() };
        let report = wrapped(err, "failed to fetch metadata");
        assert_eq!(config_hint(&*report), None);
    }

    #[tokio::test]
    async fn hints_at_unreachable_api() {
        let client = IpfsClient::new("http://127.0.0.1:1").unwrap();
        let err = client.cat("bafy123").await.unwrap_err();
        let report = wrapped(err, "failed to fetch metadata");
        assert_eq!(
            config_hint(&*report),
            Some("the IPFS API is unreachable; check MINTY_IPFS_API_URL")
        );
    }
}
