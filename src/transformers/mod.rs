/*! Text normalizers.

Normalizers lower-case a raw corpus line and clean it up before it is packaged:

- [ArticleCleaner] replaces bracket aliases in long-form text and ensures a final period,
- [PostCleaner] strips retweet prefixes, citations, bracketed spans and arXiv links from short posts.

!*/
mod article;
mod normalize;
mod post;

pub use article::ArticleCleaner;
pub use normalize::Normalize;
pub use post::{PostCleaner, SENTENCE_END, SENTENCE_START};
