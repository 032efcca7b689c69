mod chunk_indexer;
mod cross_encoder;
mod dense;
mod graph_storage;
mod law_fetcher;

pub use chunk_indexer::IChunkIndexer;
pub use cross_encoder::ICrossEncoder;
pub use dense::{IEmbedder, IVectorIndex};
pub use graph_storage::IGraphStorage;
pub use law_fetcher::ILawFetcher;
