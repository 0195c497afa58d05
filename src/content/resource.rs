//! Fixed presentation data: project manifest, timeline entries, skills.
//!
//! These are product data, not configuration; the counts and values are
//! fixed by design. The project manifest can also be parsed from JSON so
//! the works grid can ship as a static file next to the fragments.

use serde::Deserialize;

/// One project in the works grid.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectEntry {
    pub id: String,
    pub cover: String,
    pub title_path: String,
}

impl ProjectEntry {
    /// Path of the project's detail fragment.
    ///
    pub fn detail_path(&self) -> String {
        format!("projects/{}/detail.html", self.id)
    }
}

/// Built-in manifest of the six works-grid projects.
///
pub fn default_projects() -> Vec<ProjectEntry> {
    (1..=6)
        .map(|index| ProjectEntry {
            id: format!("project-{}", index),
            cover: format!("projects/project-{}/images/cover.png", index),
            title_path: format!("projects/project-{}/title.txt", index),
        })
        .collect()
}

/// Parse a project manifest from JSON.
///
pub fn parse_manifest(json: &str) -> Result<Vec<ProjectEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Which side of the timeline an entry sits on.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSide {
    Left,
    Right,
}

/// One timeline entry: a date label, its side, its vertical offset from the
/// first entry, and the number of content lines it reveals.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry {
    pub time: &'static str,
    pub side: TimelineSide,
    pub top_offset: f64,
    pub line_count: usize,
}

/// The twelve timeline entries, top to bottom.
///
pub const TIMELINE_ENTRIES: [TimelineEntry; 12] = [
    TimelineEntry { time: "09.2018", side: TimelineSide::Left, top_offset: 0.0, line_count: 3 },
    TimelineEntry { time: "03.2022", side: TimelineSide::Right, top_offset: 110.0, line_count: 3 },
    TimelineEntry { time: "06.2022", side: TimelineSide::Left, top_offset: 300.0, line_count: 0 },
    TimelineEntry { time: "05.2022", side: TimelineSide::Right, top_offset: 260.0, line_count: 0 },
    TimelineEntry { time: "07.2022", side: TimelineSide::Right, top_offset: 340.0, line_count: 3 },
    TimelineEntry { time: "09.2022", side: TimelineSide::Right, top_offset: 490.0, line_count: 0 },
    TimelineEntry { time: "08.2024", side: TimelineSide::Right, top_offset: 570.0, line_count: 5 },
    TimelineEntry { time: "10.2024", side: TimelineSide::Left, top_offset: 730.0, line_count: 3 },
    TimelineEntry { time: "11.2024", side: TimelineSide::Right, top_offset: 770.0, line_count: 0 },
    TimelineEntry { time: "12.2024", side: TimelineSide::Right, top_offset: 810.0, line_count: 3 },
    TimelineEntry { time: "06.2025", side: TimelineSide::Right, top_offset: 960.0, line_count: 4 },
    TimelineEntry { time: "03.2028", side: TimelineSide::Left, top_offset: 1210.0, line_count: 0 },
];

/// Progress bars drawn along the timeline: anchored entry and maximum
/// height in pixels.
///
pub const PROGRESS_BARS: [(&str, f64); 6] = [
    ("09.2018", 300.0),
    ("10.2024", 480.0),
    ("03.2022", 150.0),
    ("07.2022", 150.0),
    ("08.2024", 200.0),
    ("12.2024", 400.0),
];

/// One skill ring with its fill percentage.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillEntry {
    pub title: &'static str,
    pub percentage: f64,
}

/// The four skill rings, in display order.
///
pub const SKILLS: [SkillEntry; 4] = [
    SkillEntry { title: "UI", percentage: 80.0 },
    SkillEntry { title: "UX", percentage: 80.0 },
    SkillEntry { title: "3D", percentage: 70.0 },
    SkillEntry { title: "Sprache", percentage: 75.0 },
];

/// Radius of the skill ring SVG circles.
///
pub const SKILL_RING_RADIUS: f64 = 54.0;

/// Stroke dash offset that renders a ring filled to the given percentage.
///
pub fn ring_dash_offset(percentage: f64) -> f64 {
    let circumference = 2.0 * std::f64::consts::PI * SKILL_RING_RADIUS;
    circumference - (percentage / 100.0) * circumference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_projects() {
        let projects = default_projects();
        assert_eq!(projects.len(), 6);
        assert_eq!(projects[0].id, "project-1");
        assert_eq!(projects[5].cover, "projects/project-6/images/cover.png");
        assert_eq!(projects[2].detail_path(), "projects/project-3/detail.html");
    }

    #[test]
    fn test_parse_manifest() {
        let json = r#"[
            {"id": "project-1", "cover": "c.png", "title_path": "t.txt"}
        ]"#;
        let projects = parse_manifest(json).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "project-1");
    }

    #[test]
    fn test_parse_manifest_rejects_garbage() {
        assert!(parse_manifest("not json").is_err());
    }

    #[test]
    fn test_timeline_entries_ordered_from_first() {
        assert_eq!(TIMELINE_ENTRIES[0].top_offset, 0.0);
        assert_eq!(TIMELINE_ENTRIES.len(), 12);
    }

    #[test]
    fn test_progress_bars_reference_existing_entries() {
        for (time, _) in PROGRESS_BARS {
            assert!(
                TIMELINE_ENTRIES.iter().any(|entry| entry.time == time),
                "no timeline entry for {}",
                time
            );
        }
    }

    #[test]
    fn test_ring_dash_offset() {
        let circumference = 2.0 * std::f64::consts::PI * SKILL_RING_RADIUS;
        assert_eq!(ring_dash_offset(100.0), 0.0);
        assert!((ring_dash_offset(0.0) - circumference).abs() < 1e-9);
        assert!((ring_dash_offset(50.0) - circumference / 2.0).abs() < 1e-9);
    }
}
