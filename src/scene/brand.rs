use serde::{Deserialize, Serialize};

/// Fixed copy printed on every poster, independent of the template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Brand {
    /// First headline line.
    pub headline: String,
    /// Second headline line.
    pub tagline: String,
    /// Script greeting under the designation.
    pub greeting: String,
    /// Website shown in the footer.
    pub website: String,
    /// Social handle shown in the footer.
    pub instagram: String,
    /// Phone number shown in the footer.
    pub phone: String,
    /// Attribution line at the very bottom.
    pub powered_by: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            headline: "#26".to_string(),
            tagline: "Apna Hai".to_string(),
            greeting: "Happy New Year".to_string(),
            website: "alphadigify.com".to_string(),
            instagram: "@alphadigify".to_string(),
            phone: "+92 3001001483".to_string(),
            powered_by: "Powered by Alphadigify Solutions".to_string(),
        }
    }
}
