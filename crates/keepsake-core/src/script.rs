//! Presentation content.
//!
//! Every string shown on screen comes from a `Script`. The defaults are the
//! built-in presentation; a TOML file with the same shape can replace any part
//! of it (missing sections keep their defaults).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub welcome: WelcomeText,
    pub consent: PromptText,
    pub heart: HeartText,
    pub gratitude: PromptText,
    pub drag: DragText,
    pub confession: ConfessionText,
    pub assurance: PromptText,
    pub letter: LetterText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeText {
    pub heading: String,
    /// Lines revealed one at a time after the heading.
    pub lines: Vec<String>,
    pub button: String,
}

/// Lines followed by a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptText {
    pub lines: Vec<String>,
    pub button: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartText {
    pub prompt: String,
    pub hint: String,
    /// Shown once the heart has been tapped enough.
    pub reveal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragText {
    pub prompt: String,
    pub hint: String,
    /// Revealed word by word as the slider moves.
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfessionText {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterText {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_string()).collect()
}

impl Default for WelcomeText {
    fn default() -> Self {
        Self {
            heading: "Hi, Sannidhi.".to_string(),
            lines: owned(&["I made something for you.", "We can take this slow."]),
            button: "I’m ready.".to_string(),
        }
    }
}

impl Default for PromptText {
    fn default() -> Self {
        Self {
            lines: owned(&["This is just something I wanted you to have."]),
            button: "Okay.".to_string(),
        }
    }
}

impl PromptText {
    fn gratitude() -> Self {
        Self {
            lines: owned(&[
                "There's a quiet way you move through everyday life that changes the people around you.",
                "You don't rush, you don't push — you just make things feel calmer, clearer, more possible.",
                "Being close to you has made me more confident in my own life, without you ever trying to teach me how.",
            ]),
            button: "Next.".to_string(),
        }
    }

    fn assurance() -> Self {
        Self {
            lines: owned(&[
                "Nothing about this changes the quiet parts of us.",
                "I'm still here — in the ordinary days, the unsure moments, and everything in between.",
                "You don't have to hold anything differently. I just wanted you to know.",
            ]),
            button: "Stay.".to_string(),
        }
    }
}

impl Default for HeartText {
    fn default() -> Self {
        Self {
            prompt: "Before I say more, take a moment.".to_string(),
            hint: "Tap the heart when you're ready to feel loved.".to_string(),
            reveal: "You always make space for me like this.".to_string(),
        }
    }
}

impl Default for DragText {
    fn default() -> Self {
        Self {
            prompt: "Take this slow.".to_string(),
            hint: "Drag when you're ready.".to_string(),
            sentence: "Loving you has quietly taught me how to trust myself.".to_string(),
        }
    }
}

impl Default for ConfessionText {
    fn default() -> Self {
        Self {
            lines: owned(&[
                "Sannidhi, I love you ❤️",
                "Not just for how you make me feel, but for how you've become part of how I live.",
                "I choose you — with gratitude, with certainty, and with all the calm you've brought into my life.",
            ]),
        }
    }
}

impl Default for LetterText {
    fn default() -> Self {
        Self {
            heading: "This is the part I would've written by hand.".to_string(),
            paragraphs: owned(&[
                "My dear Sannidhi Putta,❤️,",
                "I may never be able to tell you this, but I feel like I've already married you. ❤️🧎🏻",
                "Not in a temple, 🛕 not in front of people, but deep inside my heart.🌸❤️",
                "I married your soul the day you understood my feelings. 🪷❤️",
                "I married your smile when it healed my chaos. 😌🌝",
                "I married your presence when it became my peace. ☮️",
                "Because love isn't about rituals or rings. 💍 🔥",
                "It's about choosing each other every single day, 🌝through every fight, 🫠every tear, 🥹every distance. 🫠",
                "When two souls stay loyal, when they never give up on each other. 🥹😌🔥❤️🌸🪷",
                "That's marriage. 🌸🪷🤩🥹❤️🌝",
                "Pure. Real. Eternal. 🔥🔥🧿🧿🌸🪷",
                "Like the one you've already married by heart.💓❤️🌸🧿",
                "I will choose you, even when life gets harder !",
                "I promise to hold you when days feel heavy, and laugh with you when they feel right!",
                "I’ll celebrate your wins ! And stay even when things get messy!",
                "I don’t promise perfection! Just honesty, efforts and live that keeps choosing YOU ❤️! Every single day ..❤️",
                "I love you soo much Sannidhi ❤️",
            ]),
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self {
            welcome: WelcomeText::default(),
            consent: PromptText::default(),
            heart: HeartText::default(),
            gratitude: PromptText::gratitude(),
            drag: DragText::default(),
            confession: ConfessionText::default(),
            assurance: PromptText::assurance(),
            letter: LetterText::default(),
        }
    }
}

impl Script {
    /// Loads a script from a TOML file and validates it.
    ///
    /// Sections missing from the file fall back to the built-in text.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script from {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to load script from {}", path.display()))
    }

    /// Parses and validates a TOML script.
    pub fn parse(contents: &str) -> Result<Self> {
        let overrides: toml::Table = toml::from_str(contents).context("Invalid TOML")?;

        // Merge field by field over the built-in script. `PromptText` is shared
        // by three pages, so its serde defaults alone would fill a partial
        // `[gratitude]` table with consent text.
        let toml::Value::Table(mut base) =
            toml::Value::try_from(Script::default()).context("Failed to encode built-in script")?
        else {
            bail!("Built-in script did not encode as a table");
        };
        for (section, value) in overrides {
            match (base.get_mut(&section), value) {
                (Some(toml::Value::Table(target)), toml::Value::Table(fields)) => {
                    target.extend(fields);
                }
                (_, value) => {
                    base.insert(section, value);
                }
            }
        }

        let script: Script = toml::Value::Table(base)
            .try_into()
            .context("Invalid script")?;
        script.validate()?;
        Ok(script)
    }

    /// Renders the script as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize script")
    }

    /// Rejects scripts that would leave a page with nothing to show.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("welcome.lines", &self.welcome.lines),
            ("consent.lines", &self.consent.lines),
            ("gratitude.lines", &self.gratitude.lines),
            ("confession.lines", &self.confession.lines),
            ("assurance.lines", &self.assurance.lines),
            ("letter.paragraphs", &self.letter.paragraphs),
        ];
        for (name, lines) in sections {
            if lines.is_empty() {
                bail!("Script section `{name}` must not be empty");
            }
        }

        let buttons = [
            ("welcome.button", &self.welcome.button),
            ("consent.button", &self.consent.button),
            ("gratitude.button", &self.gratitude.button),
            ("assurance.button", &self.assurance.button),
        ];
        for (name, label) in buttons {
            if label.trim().is_empty() {
                bail!("Script field `{name}` must not be blank");
            }
        }

        if self.drag.sentence.split_whitespace().next().is_none() {
            bail!("Script field `drag.sentence` must contain at least one word");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_is_valid() {
        let script = Script::default();
        script.validate().unwrap();
        assert_eq!(script.welcome.lines.len(), 2);
        assert_eq!(script.gratitude.lines.len(), 3);
        assert_eq!(script.gratitude.button, "Next.");
        assert_eq!(script.assurance.button, "Stay.");
        assert_eq!(script.consent.button, "Okay.");
        assert_eq!(script.confession.lines.len(), 3);
        assert_eq!(script.letter.paragraphs.len(), 17);
        assert_eq!(script.letter.paragraphs[0], "My dear Sannidhi Putta,❤️,");
    }

    #[test]
    fn test_partial_script_keeps_page_defaults() {
        let script = Script::parse(
            r#"
[welcome]
heading = "Hello, you."

[letter]
paragraphs = ["Short and sweet."]
"#,
        )
        .unwrap();
        assert_eq!(script.welcome.heading, "Hello, you.");
        assert_eq!(script.welcome.lines, Script::default().welcome.lines);
        assert_eq!(script.gratitude, Script::default().gratitude);
        assert_eq!(script.letter.paragraphs, vec!["Short and sweet."]);
        assert_eq!(script.letter.heading, Script::default().letter.heading);
    }

    #[test]
    fn test_rejects_empty_sections() {
        let err = Script::parse("[confession]\nlines = []\n").unwrap_err();
        assert!(format!("{err:#}").contains("confession.lines"));

        let err = Script::parse("[drag]\nsentence = \"   \"\n").unwrap_err();
        assert!(format!("{err:#}").contains("drag.sentence"));

        let err = Script::parse("[assurance]\nbutton = \"\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("assurance.button"));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let text = Script::default().to_toml().unwrap();
        assert!(text.contains("[letter]"));
        assert_eq!(Script::parse(&text).unwrap(), Script::default());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.toml");
        std::fs::write(&path, "[welcome\n").unwrap();
        let err = Script::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("script.toml"));
    }
}
