pub mod asset;
pub mod io;
pub mod loader;

pub use asset::{Asset, LoadState};
pub use io::{AssetReader, AssetReaderVariant, AssetSource, FileAssetReader};
#[cfg(feature = "http")]
pub use io::HttpAssetReader;
pub use loader::{AssetLoader, LoadedAsset, ManifestLoader, MemoryLoader};
