//! Fixed emergency contact list.
//!
//! Shown by `/emergency` and `haven emergency` independently of the stored
//! resource table.

use super::render::Renderer;
use crate::Result;
use std::fmt;
use std::io::Write;

/// One emergency contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyContact {
    /// Organisation name.
    pub name: &'static str,
    /// How to reach them.
    pub detail: &'static str,
    /// Website.
    pub url: &'static str,
}

impl fmt::Display for EmergencyContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}\n{}", self.name, self.detail, self.url)
    }
}

/// Header shown before [`INDIA_CONTACTS`].
pub const INDIA_HEADER: &str = "🚨 Here are emergency resources in India:";

/// Header shown before [`GLOBAL_CONTACTS`].
pub const GLOBAL_HEADER: &str = "🚨 Here are some important resources globalwise:";

/// Regional helplines, shown first.
pub const INDIA_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "Vandrevala Foundation",
        detail: "Call +91 9999 666 555 (24/7)",
        url: "https://www.vandrevalafoundation.com",
    },
    EmergencyContact {
        name: "iCall Helpline",
        detail: "Call +91 91529 87821 (Mon-Sat, 10AM-8PM)",
        url: "https://icallhelpline.org",
    },
    EmergencyContact {
        name: "AASRA (Suicide Prevention)",
        detail: "Call +91 98204 66766 (24/7)",
        url: "http://www.aasra.info",
    },
    EmergencyContact {
        name: "National Mental Health Helpline",
        detail: "Call 1800-599-0019 (24/7)",
        url: "https://www.nimhans.ac.in",
    },
    EmergencyContact {
        name: "Fortis Stress Helpline",
        detail: "Call +91 83768 04102 (24/7)",
        url: "https://www.fortishealthcare.com",
    },
];

/// International helplines.
pub const GLOBAL_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "National Suicide Prevention Lifeline (US)",
        detail: "Call 988",
        url: "https://988lifeline.org",
    },
    EmergencyContact {
        name: "Crisis Text Line",
        detail: "Text HOME to 741741",
        url: "https://www.crisistextline.org",
    },
    EmergencyContact {
        name: "International Association for Suicide Prevention",
        detail: "Find resources worldwide",
        url: "https://www.iasp.info/resources/Crisis_Centres/",
    },
    EmergencyContact {
        name: "Mental Health America",
        detail: "Find local resources",
        url: "https://www.mhanational.org",
    },
];

/// Renders both lists, regional first.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn render_emergency<W: Write>(renderer: &mut Renderer<W>) -> Result<()> {
    for (header, contacts) in [
        (INDIA_HEADER, INDIA_CONTACTS),
        (GLOBAL_HEADER, GLOBAL_CONTACTS),
    ] {
        renderer.bot(header)?;
        for contact in contacts {
            renderer.resource(&contact.to_string())?;
        }
    }
    Ok(())
}
