//! Illustrative credit-score heuristic driven by three sliders.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MIN_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 850;

pub const CREDIT_TIPS: [&str; 10] = [
    "Pay your credit card bill on time. Even one missed payment can hurt your score.",
    "Keep your credit utilization below 30% to show lenders you're responsible.",
    "Avoid applying for too many credit cards in a short period.",
    "Longer credit history boosts your score, so keep old accounts open.",
    "Check your credit report regularly for any errors or fraud.",
    "Don't max out your credit card. Low utilization keeps you healthy.",
    "Pay more than the minimum due. It reduces interest and builds trust.",
    "Use automatic payments to never miss a due date.",
    "Mix of credit types (loans + cards) can improve your score over time.",
    "Consistency is key. Small, regular payments are better than late big ones.",
];

/// Slider positions. Values are clamped into the slider ranges on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditFactors {
    /// On-time payments, 0-100 %.
    pub payment_history: f64,
    /// Share of available credit in use, 0-100 %.
    pub utilization: f64,
    /// Age of the oldest account, 0-20 years.
    pub credit_age_years: f64,
}

impl Default for CreditFactors {
    fn default() -> Self {
        Self {
            payment_history: 80.0,
            utilization: 40.0,
            credit_age_years: 3.0,
        }
    }
}

impl CreditFactors {
    pub fn new(payment_history: f64, utilization: f64, credit_age_years: f64) -> Self {
        Self {
            payment_history: clamp_slider(payment_history, 100.0),
            utilization: clamp_slider(utilization, 100.0),
            credit_age_years: clamp_slider(credit_age_years, 20.0),
        }
    }

    /// `300 + history·3 + (100 − utilization)·2 + age·10`, rounded, then clamped.
    pub fn raw_score(&self) -> f64 {
        300.0
            + self.payment_history * 3.0
            + (100.0 - self.utilization) * 2.0
            + self.credit_age_years * 10.0
    }

    pub fn score(&self) -> u16 {
        self.raw_score()
            .round()
            .clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u16
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score())
    }
}

fn clamp_slider(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn for_score(score: u16) -> Self {
        match score {
            s if s < 580 => ScoreBand::Poor,
            s if s < 670 => ScoreBand::Fair,
            s if s < 740 => ScoreBand::Good,
            _ => ScoreBand::Excellent,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Poor => "Poor: let's work on your habits.",
            ScoreBand::Fair => "Fair: you're getting there!",
            ScoreBand::Good => "Good: keep it up!",
            ScoreBand::Excellent => "Excellent: you're a credit pro!",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Poor => "Poor",
            ScoreBand::Fair => "Fair",
            ScoreBand::Good => "Good",
            ScoreBand::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Picks the tip shown for `date`; stable for a whole day.
pub fn tip_for_day(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(CREDIT_TIPS.len() as i32) as usize;
    CREDIT_TIPS[index]
}
