//! Home feed: the welcome banner, health cards and quick links shown on
//! the first screen. The content is static.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    News,
    Tip,
    Alert,
}

/// A card in the home feed.
#[derive(Debug, Clone, Serialize)]
pub struct HomeCard {
    pub id: &'static str,
    pub kind: CardKind,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub body: &'static str,
    /// Figure shown prominently above the body, if any.
    pub highlight: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickLink {
    pub label: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cards: Vec<HomeCard>,
    pub quick_links: Vec<QuickLink>,
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

pub fn home_feed() -> HomeFeed {
    HomeFeed {
        title: "Welcome to eMedic",
        subtitle: "Your personalized health assistant",
        cards: vec![
            HomeCard {
                id: "covid-19",
                kind: CardKind::News,
                title: "COVID-19: What You Should Know",
                subtitle: Some("Latest updates on coronavirus"),
                body: "Stay safe and informed with real-time COVID updates.",
                highlight: None,
            },
            HomeCard {
                id: "heart-disease",
                kind: CardKind::News,
                title: "Heart Disease Prevention",
                subtitle: Some("How to reduce your risk"),
                body: "Adopt a heart-healthy lifestyle with our expert tips.",
                highlight: None,
            },
            HomeCard {
                id: "diabetes",
                kind: CardKind::News,
                title: "Tips for Diabetes",
                subtitle: Some("Managing blood sugar levels"),
                body: "Maintain a balanced diet and monitor regularly.",
                highlight: Some("5.8"),
            },
            HomeCard {
                id: "daily-tip",
                kind: CardKind::Tip,
                title: "Health Tip of the Day",
                subtitle: None,
                body: "Drink at least 8 glasses of water and walk 30 mins daily.",
                highlight: None,
            },
            HomeCard {
                id: "emergency",
                kind: CardKind::Alert,
                title: "Emergency Alert",
                subtitle: Some("Seek help immediately if you feel dizzy."),
                body: "Contact emergency services or visit the nearest hospital.",
                highlight: None,
            },
        ],
        quick_links: vec![
            QuickLink {
                label: "Book Appointment",
                route: "/appointments",
            },
            QuickLink {
                label: "My Profile",
                route: "/profile",
            },
            QuickLink {
                label: "Health Records",
                route: "/records",
            },
        ],
    }
}
