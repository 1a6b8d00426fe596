//! Dialog texts and navigation requests surfaced to the page.

use serde::Serialize;

/// Video shown by the explanation page.
pub const EXPLANATION_VIDEO_PATH: &str = "/videos/explicacion-carga-electrica.mp4";
pub const EXPLANATION_ROUTE: &str = "/explicacion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Intro,
    Manual,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub title: &'static str,
    pub body: &'static str,
}

impl DialogKind {
    /// Numeric code carried in game events (0 means no dialog).
    pub fn code(self) -> f32 {
        match self {
            DialogKind::Intro => 1.0,
            DialogKind::Manual => 2.0,
            DialogKind::Success => 3.0,
        }
    }

    pub fn content(self) -> Dialog {
        match self {
            DialogKind::Intro => Dialog {
                title: "👋 Welcome!",
                body: "Goal: show electric attraction.\n\n\
                       1) Take a balloon from the table.\n\
                       2) Rub it on the character's hair until it is charged (you will see blue electrons).\n\
                       3) Bring it close to the paper scraps and watch them get attracted.",
            },
            DialogKind::Manual => Dialog {
                title: "📖 Manual",
                body: "1) Take the balloons.\n\
                       2) Rub them on the character's hair to charge them (blue electrons appear inside).\n\
                       3) Bring them close to the paper scraps to see the attraction.",
            },
            DialogKind::Success => Dialog {
                title: "Congratulations! 🎉",
                body: "You charged a balloon by friction and attracted the paper scraps.\n\n\
                       When you are ready, press «Continue». Then you will see the «Explanation» button.",
            },
        }
    }
}

/// A page change the host should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: &'static str,
    /// Asset handed to the destination page.
    pub src: &'static str,
}

impl Navigation {
    pub fn explanation() -> Self {
        Self {
            route: EXPLANATION_ROUTE,
            src: EXPLANATION_VIDEO_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_nonzero() {
        let codes = [DialogKind::Intro, DialogKind::Manual, DialogKind::Success].map(DialogKind::code);
        assert!(codes.iter().all(|c| *c > 0.0));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
    }

    #[test]
    fn explanation_carries_the_video() {
        let nav = Navigation::explanation();
        assert_eq!(nav.src, "/videos/explicacion-carga-electrica.mp4");
        let json = serde_json::to_string(&nav).unwrap();
        assert!(json.contains("\"route\":\"/explicacion\""));
    }

    #[test]
    fn success_mentions_continue() {
        assert!(DialogKind::Success.content().body.contains("Continue"));
    }
}
