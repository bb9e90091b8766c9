use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{Result, ViewerError};

/// Anything that names an asset: a local path or an `http(s)://` URL.
pub trait AssetSource {
    /// Full reference string.
    fn uri(&self) -> Cow<'_, str>;

    /// Last path segment of the reference.
    fn filename(&self) -> Option<Cow<'_, str>> {
        let uri = self.uri();
        let name = if is_remote(&uri) {
            uri.rsplit('/').next().map(str::to_owned)
        } else {
            Path::new(uri.as_ref())
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_owned)
        };
        name.filter(|n| !n.is_empty()).map(Cow::Owned)
    }
}

impl AssetSource for &str {
    fn uri(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AssetSource for String {
    fn uri(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl AssetSource for &Path {
    fn uri(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }
}

impl AssetSource for PathBuf {
    fn uri(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }
}

#[inline]
pub(crate) fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Asynchronous byte reader.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Local file reader rooted at the directory of the source.
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(source: impl AsRef<Path>) -> Self {
        let path = source.as_ref();
        let root_path = if path.is_dir() {
            path.to_path_buf()
        } else {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ViewerError::AssetNotFound(path.display().to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// HTTP reader rooted at the directory part of the source URL.
#[cfg(feature = "http")]
pub struct HttpAssetReader {
    root_url: url::Url,
}

#[cfg(feature = "http")]
impl HttpAssetReader {
    pub fn new(url_str: &str) -> Result<Self> {
        let url = url::Url::parse(url_str)?;
        let root_url = if url.path().ends_with('/') {
            url
        } else {
            let mut u = url.clone();
            if let Ok(mut segments) = u.path_segments_mut() {
                segments.pop();
                segments.push("");
            }
            u
        };
        Ok(Self { root_url })
    }

    #[inline]
    #[must_use]
    pub fn root_url(&self) -> &url::Url {
        &self.root_url
    }
}

#[cfg(feature = "http")]
impl AssetReader for HttpAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let url = self.root_url.join(uri)?;
        let response = ehttp::fetch_async(ehttp::Request::get(url.as_str()))
            .await
            .map_err(ViewerError::HttpError)?;
        if !response.ok {
            if response.status == 404 {
                return Err(ViewerError::AssetNotFound(url.to_string()));
            }
            return Err(ViewerError::HttpResponseError {
                status: response.status,
            });
        }
        Ok(response.bytes)
    }
}

/// Reader picked from the shape of the source string.
#[derive(Clone)]
pub enum AssetReaderVariant {
    File(Arc<FileAssetReader>),
    #[cfg(feature = "http")]
    Http(Arc<HttpAssetReader>),
}

impl AssetReaderVariant {
    pub fn from_source(source: &str) -> Result<Self> {
        if is_remote(source) {
            #[cfg(feature = "http")]
            {
                Ok(Self::Http(Arc::new(HttpAssetReader::new(source)?)))
            }
            #[cfg(not(feature = "http"))]
            {
                Err(ViewerError::FeatureNotEnabled(
                    "HTTP support is disabled. Enable it with `features = [\"http\"]`".to_string(),
                ))
            }
        } else {
            Ok(Self::File(Arc::new(FileAssetReader::new(source))))
        }
    }

    pub async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes(uri).await,
            #[cfg(feature = "http")]
            Self::Http(r) => r.read_bytes(uri).await,
        }
    }
}
