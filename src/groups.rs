//! Buckets channels into the `group-title` categories IPTV players show.

/// One classification rule: the label applies when any keyword is a
/// substring of the channel name.
#[derive(Debug, Clone)]
pub struct GroupRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl GroupRule {
    #[must_use]
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    fn matches(&self, channel_name: &str) -> bool {
        self.keywords.iter().any(|k| channel_name.contains(k.as_str()))
    }
}

/// Ordered rule table plus the fallback label for unmatched names.
///
/// Rules may overlap and the first match wins, so order is part of the
/// configuration: with the default table, `CCTV-14` lands in `Kids` even
/// though the `CCTV` rule would also match it.
#[derive(Debug, Clone)]
pub struct GroupRules {
    rules: Vec<GroupRule>,
    fallback: String,
    restricted: Vec<String>,
}

impl GroupRules {
    #[must_use]
    pub fn new(rules: Vec<GroupRule>, fallback: &str, restricted: &[&str]) -> Self {
        Self {
            rules,
            fallback: fallback.to_string(),
            restricted: restricted.iter().map(ToString::to_string).collect(),
        }
    }

    /// Label of the first rule matching `channel_name`, or the fallback.
    #[must_use]
    pub fn classify(&self, channel_name: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(channel_name))
            .map_or(self.fallback.as_str(), |rule| rule.label.as_str())
    }

    /// Whether channels of this group belong in the kid-safe playlist.
    ///
    /// Kids' channels and unclassified channels are the ones kept out; this
    /// is a content filter, not a quality filter.
    #[must_use]
    pub fn kid_safe(&self, label: &str) -> bool {
        !self.restricted.iter().any(|r| r == label)
    }
}

impl Default for GroupRules {
    /// The Jiangsu Unicom lineup grouping. Keywords are the substrings the
    /// provider actually uses in channel names, so most stay in Chinese.
    fn default() -> Self {
        Self::new(
            vec![
                GroupRule::new("Kids", &["少儿", "卡通", "CCTV-14"]),
                GroupRule::new("CCTV", &["CCTV", "CGTN"]),
                GroupRule::new("Jiangsu", &["江苏", "南京"]),
                GroupRule::new("Satellite", &["卫视"]),
                GroupRule::new("Education", &["CETV", "教育"]),
            ],
            "Other",
            &["Kids", "Other"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kids_rule_precedes_cctv_rule() {
        let rules = GroupRules::default();
        assert_eq!(rules.classify("CCTV-14少儿"), "Kids");
        assert_eq!(rules.classify("CCTV-14"), "Kids");
        assert_eq!(rules.classify("CCTV-1"), "CCTV");
    }

    #[test]
    fn default_table_matches_lineup_names() {
        let rules = GroupRules::default();
        assert_eq!(rules.classify("CGTN英语"), "CCTV");
        assert_eq!(rules.classify("江苏卫视"), "Jiangsu");
        assert_eq!(rules.classify("南京新闻综合"), "Jiangsu");
        assert_eq!(rules.classify("湖南卫视"), "Satellite");
        assert_eq!(rules.classify("CETV-1"), "Education");
        assert_eq!(rules.classify("金鹰卡通"), "Kids");
    }

    #[test]
    fn unmatched_name_gets_fallback_label() {
        let rules = GroupRules::default();
        assert_eq!(rules.classify("凤凰中文"), "Other");
        assert_eq!(rules.classify(""), "Other");
    }

    #[test]
    fn first_match_wins_on_injected_table() {
        let overlapping = GroupRules::new(
            vec![
                GroupRule::new("News", &["新闻"]),
                GroupRule::new("Local", &["南京"]),
            ],
            "Misc",
            &[],
        );
        // Matches both rules; listed order decides.
        assert_eq!(overlapping.classify("南京新闻综合"), "News");

        let reversed = GroupRules::new(
            vec![
                GroupRule::new("Local", &["南京"]),
                GroupRule::new("News", &["新闻"]),
            ],
            "Misc",
            &[],
        );
        assert_eq!(reversed.classify("南京新闻综合"), "Local");
    }

    #[test]
    fn kid_safe_excludes_kids_and_fallback_groups() {
        let rules = GroupRules::default();
        assert!(!rules.kid_safe("Kids"));
        assert!(!rules.kid_safe("Other"));
        assert!(rules.kid_safe("CCTV"));
        assert!(rules.kid_safe("Jiangsu"));
        assert!(rules.kid_safe("Satellite"));
        assert!(rules.kid_safe("Education"));
    }
}
