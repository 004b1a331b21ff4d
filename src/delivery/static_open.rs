//! Opens the documentation index directly with the default viewer.

use url::Url;

use super::opener::{Opener, SystemOpener};
use crate::config::LauncherConfig;
use crate::core::{DeliveryStrategy, DocsError, DocsLocator};

pub struct StaticDelivery<O = SystemOpener> {
    locator: DocsLocator,
    online_url: Option<String>,
    opener: O,
}

impl StaticDelivery<SystemOpener> {
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(
            DocsLocator::from_config(config),
            config.online_url.clone(),
            SystemOpener,
        )
    }
}

impl<O: Opener> StaticDelivery<O> {
    pub fn new(locator: DocsLocator, online_url: Option<String>, opener: O) -> Self {
        Self {
            locator,
            online_url,
            opener,
        }
    }

    /// The URL the viewer will be pointed at: the local index when it exists,
    /// otherwise the configured online copy.
    pub fn target(&self) -> Result<String, DocsError> {
        match self.locator.locate() {
            Ok(tree) => Url::from_file_path(tree.index())
                .map(String::from)
                .map_err(|()| DocsError::InvalidPath(tree.index().to_path_buf())),
            Err(DocsError::NotFound { searched }) => match &self.online_url {
                Some(url) => {
                    tracing::warn!(
                        "No local documentation found (searched {} locations), using {}",
                        searched.len(),
                        url
                    );
                    Ok(url.clone())
                }
                None => Err(DocsError::NotFound { searched }),
            },
            Err(e) => Err(e),
        }
    }
}

impl<O: Opener> DeliveryStrategy for StaticDelivery<O> {
    type Error = DocsError;

    fn launch(&self) -> Result<(), DocsError> {
        let target = self.target()?;
        tracing::info!("Opening documentation at {}", target);
        self.opener
            .open(&target)
            .map_err(|source| DocsError::Open { target, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
        refuse: bool,
    }

    impl Opener for RecordingOpener {
        fn open(&self, target: &str) -> io::Result<()> {
            self.opened.lock().unwrap().push(target.to_string());
            if self.refuse {
                Err(io::Error::new(io::ErrorKind::NotFound, "no viewer installed"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn opens_the_local_index_as_a_file_url() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>docs</h1>").unwrap();
        let opener = RecordingOpener::default();
        let delivery = StaticDelivery::new(
            DocsLocator::new(vec![dir.path().to_path_buf()], "index.html"),
            Some("https://example.org/docs/".to_string()),
            &opener,
        );

        delivery.launch().unwrap();

        let opened = opener.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        let expected = Url::from_file_path(dir.path().join("index.html")).unwrap();
        assert_eq!(opened[0], expected.as_str());
        assert!(opened[0].starts_with("file://"));
    }

    #[test]
    fn falls_back_to_the_online_copy() {
        let opener = RecordingOpener::default();
        let delivery = StaticDelivery::new(
            DocsLocator::new(vec!["/nonexistent/docs".into()], "index.html"),
            Some("https://example.org/docs/".to_string()),
            &opener,
        );

        delivery.launch().unwrap();

        assert_eq!(*opener.opened.lock().unwrap(), ["https://example.org/docs/"]);
    }

    #[test]
    fn missing_docs_without_fallback_is_an_error() {
        let opener = RecordingOpener::default();
        let delivery = StaticDelivery::new(
            DocsLocator::new(vec!["/nonexistent/docs".into()], "index.html"),
            None,
            &opener,
        );

        assert!(matches!(delivery.launch(), Err(DocsError::NotFound { .. })));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn viewer_failure_surfaces_as_open_error() {
        let opener = RecordingOpener {
            refuse: true,
            ..Default::default()
        };
        let delivery = StaticDelivery::new(
            DocsLocator::new(vec![], "index.html"),
            Some("https://example.org/docs/".to_string()),
            &opener,
        );

        match delivery.launch() {
            Err(DocsError::Open { target, source }) => {
                assert_eq!(target, "https://example.org/docs/");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Open error, got {other:?}"),
        }
    }
}
