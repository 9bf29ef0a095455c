//! Local filtering and completeness checks over the track collection.
//!
//! The store exposes the raw collection; list views build a
//! [`TrackFilter`] and apply it locally. Nothing here touches
//! persistence.

use super::{Language, Project, Track};

/// Predicate for the database list view.
///
/// All criteria are conjunctive. The search query matches
/// case-insensitively against title, ISRC, UPC and version label.
#[derive(Debug, Clone, Default)]
pub struct TrackFilter {
    /// Free-text query; empty matches everything
    pub search: String,
    /// Restrict to tracks performed in this language
    pub language: Option<Language>,
    /// Restrict to one release project
    pub project: Option<Project>,
    /// Only editors' picks
    pub only_editors_pick: bool,
}

impl TrackFilter {
    /// True when the filter would pass every track.
    pub fn is_unrestricted(&self) -> bool {
        self.search.trim().is_empty()
            && self.language.is_none()
            && self.project.is_none()
            && !self.only_editors_pick
    }

    /// Does `track` satisfy every criterion?
    pub fn matches(&self, track: &Track) -> bool {
        let query = self.search.trim().to_lowercase();
        let matches_search = query.is_empty()
            || track.title.to_lowercase().contains(&query)
            || track.isrc.to_lowercase().contains(&query)
            || track.upc.to_lowercase().contains(&query)
            || track
                .version_label
                .as_ref()
                .is_some_and(|v| v.to_lowercase().contains(&query));

        let matches_lang = self
            .language
            .is_none_or(|lang| track.languages.contains(&lang));
        let matches_project = self.project.is_none_or(|p| track.project == p);
        let matches_pick = !self.only_editors_pick || track.is_editors_pick;

        matches_search && matches_lang && matches_project && matches_pick
    }

    /// Apply the filter, preserving collection order.
    pub fn apply<'a>(&self, tracks: &'a [Track]) -> Vec<&'a Track> {
        tracks.iter().filter(|t| self.matches(t)).collect()
    }
}

impl Track {
    /// Completeness report: labels of the data this record is missing.
    ///
    /// A placeholder picsum cover counts as missing cover art. Empty
    /// means the record is releasable as-is.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.isrc.is_empty() {
            missing.push("ISRC");
        }
        if self.lyrics.as_ref().is_none_or(|l| l.is_empty()) {
            missing.push("歌詞");
        }
        if self.cover_image.is_empty() || self.cover_image.contains("picsum") {
            missing.push("封面");
        }
        if self.spotify_id.is_empty() {
            missing.push("Spotify");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_track;

    fn tracks() -> Vec<Track> {
        let mut a = sample_track("rec1");
        a.title = "再愛一次 (Love Again)".to_string();
        a.isrc = "TW-A01-23-00001".to_string();
        a.languages = vec![Language::Mandarin, Language::English];
        a.is_editors_pick = true;

        let mut b = sample_track("rec2");
        b.title = "Noodle Dreams".to_string();
        b.isrc = "TW-A01-24-00022".to_string();
        b.languages = vec![Language::Japanese, Language::Taiwanese];
        b.project = Project::InstantNoodle;
        b.version_label = Some("Acoustic Ver.".to_string());

        vec![a, b]
    }

    #[test]
    fn test_unrestricted_filter_passes_all() {
        let filter = TrackFilter::default();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&tracks()).len(), 2);
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let filter = TrackFilter {
            search: "noodle".to_string(),
            ..Default::default()
        };
        let tracks = tracks();
        let hits = filter.apply(&tracks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "rec2");
    }

    #[test]
    fn test_search_matches_isrc_and_version_label() {
        let by_isrc = TrackFilter {
            search: "23-00001".to_string(),
            ..Default::default()
        };
        assert_eq!(by_isrc.apply(&tracks())[0].id, "rec1");

        let by_version = TrackFilter {
            search: "acoustic".to_string(),
            ..Default::default()
        };
        assert_eq!(by_version.apply(&tracks())[0].id, "rec2");
    }

    #[test]
    fn test_language_and_project_filters() {
        let by_lang = TrackFilter {
            language: Some(Language::Japanese),
            ..Default::default()
        };
        assert_eq!(by_lang.apply(&tracks())[0].id, "rec2");

        let by_project = TrackFilter {
            project: Some(Project::Independent),
            ..Default::default()
        };
        assert_eq!(by_project.apply(&tracks())[0].id, "rec1");
    }

    #[test]
    fn test_editors_pick_filter() {
        let filter = TrackFilter {
            only_editors_pick: true,
            ..Default::default()
        };
        let tracks = tracks();
        let hits = filter.apply(&tracks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "rec1");
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let filter = TrackFilter {
            search: "noodle".to_string(),
            only_editors_pick: true,
            ..Default::default()
        };
        assert!(filter.apply(&tracks()).is_empty());
    }

    #[test]
    fn test_missing_fields_reports_placeholder_cover() {
        let mut track = sample_track("rec1");
        track.cover_image = "https://picsum.photos/400/400?random=1".to_string();
        track.lyrics = None;
        let missing = track.missing_fields();
        assert!(missing.contains(&"歌詞"));
        assert!(missing.contains(&"封面"));
        assert!(!missing.contains(&"ISRC"));
    }

    #[test]
    fn test_complete_track_has_no_missing_fields() {
        let mut track = sample_track("rec1");
        track.cover_image = "https://cdn.example.com/cover.jpg".to_string();
        track.lyrics = Some("歌詞第一行".to_string());
        assert!(track.missing_fields().is_empty());
    }
}
