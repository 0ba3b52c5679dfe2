//! GROQ query construction.

use super::ContentKind;

/// A read query for one document type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: ContentKind,
    /// Only documents with `featured == true`.
    pub featured_only: bool,
    /// Upper bound on the number of documents returned.
    pub limit: Option<usize>,
}

impl ContentQuery {
    /// Every document of `kind`, newest first.
    pub fn all(kind: ContentKind) -> Self {
        Self {
            kind,
            featured_only: false,
            limit: None,
        }
    }

    /// Featured documents of `kind`, capped at the kind's featured limit.
    pub fn featured(kind: ContentKind) -> Self {
        Self {
            kind,
            featured_only: true,
            limit: Some(kind.featured_limit()),
        }
    }

    /// Render the GROQ text.
    pub fn to_groq(&self) -> String {
        let mut filter = format!("_type == \"{}\"", self.kind.document_type());
        if self.featured_only {
            filter.push_str(" && featured == true");
        }

        let slice = match self.limit {
            Some(n) => format!(" [0...{n}]"),
            None => String::new(),
        };

        format!(
            "*[{filter}] | order({} desc){slice} {}",
            self.kind.order_field(),
            self.kind.projection()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_orders_by_creation_time() {
        let groq = ContentQuery::all(ContentKind::Gallery).to_groq();
        assert!(groq.starts_with("*[_type == \"gallery\"] | order(_createdAt desc) {"));
        assert!(groq.contains("\"imageUrl\": image.asset->url"));
    }

    #[test]
    fn projects_and_videos_order_by_date() {
        let groq = ContentQuery::all(ContentKind::Project).to_groq();
        assert!(groq.starts_with("*[_type == \"project\"] | order(date desc) {"));

        let groq = ContentQuery::all(ContentKind::Video).to_groq();
        assert!(groq.starts_with("*[_type == \"video\"] | order(date desc) {"));
        assert!(groq.contains("\"videoUrl\": videoFile.asset->url"));
    }

    #[test]
    fn featured_queries_filter_and_slice() {
        let groq = ContentQuery::featured(ContentKind::Project).to_groq();
        assert!(groq.starts_with(
            "*[_type == \"project\" && featured == true] | order(date desc) [0...3] {"
        ));

        let groq = ContentQuery::featured(ContentKind::Gallery).to_groq();
        assert!(groq.contains("[0...6]"));

        let groq = ContentQuery::featured(ContentKind::Video).to_groq();
        assert!(groq.contains("[0...2]"));
    }
}
