//! Multi-factor candidate scoring.
//!
//! Four heuristic subscores (team, traction, market, fit) are combined into
//! a weighted overall score, plus a breakout probability derived from the
//! first three. All constants live in [`ScoringConfig`] so funds can tune
//! the tables without forking the engine; the defaults are the shipped
//! heuristics. Scoring is pure and deterministic given a candidate and an
//! optional thesis.

use serde::{Deserialize, Serialize};

use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

/// Per-factor subscores, each within [0, 100].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub team: f64,
    pub traction: f64,
    pub market: f64,
    pub fit: f64,
}

/// Full scoring output for one candidate.
#[derive(Debug, Clone, Default)]
pub struct Score {
    /// Weighted composite, one decimal, within [0, 100]
    pub overall: f64,

    pub breakdown: ScoreBreakdown,

    /// Within [0, 99]
    pub breakout_probability: f64,

    /// Present iff a thesis was supplied
    pub fit_score: Option<f64>,

    pub fit_explanation: String,
}

/// Tunable weights and keyword tables. [`Default`] is the shipped model.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub team_weight: f64,
    pub traction_weight: f64,
    pub market_weight: f64,
    pub fit_weight: f64,

    /// Employers in a founder background worth +10 each
    pub notable_employers: Vec<String>,

    /// Schools in a founder background worth +8 each
    pub notable_schools: Vec<String>,

    /// Sector substring -> market bonus; first match wins
    pub hot_sectors: Vec<(String, f64)>,

    /// Stage substring -> market bonus (earlier stage, higher upside);
    /// first match wins
    pub stage_potential: Vec<(String, f64)>,

    /// Locations worth a +5 ecosystem bonus
    pub hub_cities: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            team_weight: 0.30,
            traction_weight: 0.25,
            market_weight: 0.25,
            fit_weight: 0.20,
            notable_employers: strings(&[
                "google",
                "meta",
                "facebook",
                "amazon",
                "apple",
                "microsoft",
                "netflix",
                "deepmind",
                "openai",
                "stripe",
                "coinbase",
            ]),
            notable_schools: strings(&[
                "stanford",
                "mit",
                "harvard",
                "berkeley",
                "yale",
                "princeton",
            ]),
            hot_sectors: vec![
                ("ai/ml".to_string(), 15.0),
                ("ai".to_string(), 15.0),
                ("healthtech".to_string(), 12.0),
                ("fintech".to_string(), 12.0),
                ("climate tech".to_string(), 15.0),
                ("enterprise saas".to_string(), 10.0),
                ("developer tools".to_string(), 10.0),
                ("crypto".to_string(), 8.0),
                ("cybersecurity".to_string(), 12.0),
                ("biotech".to_string(), 12.0),
            ],
            stage_potential: vec![
                ("pre-seed".to_string(), 10.0),
                ("seed".to_string(), 8.0),
                ("series a".to_string(), 5.0),
                ("series b".to_string(), 3.0),
                ("series c".to_string(), 2.0),
            ],
            hub_cities: strings(&[
                "san francisco",
                "new york",
                "boston",
                "austin",
                "seattle",
                "london",
            ]),
        }
    }
}

/// Heuristic scoring engine.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a candidate against an optional thesis.
    pub fn score(&self, candidate: &Candidate, thesis: Option<&ThesisFilter>) -> Score {
        let team = self.score_team(candidate);
        let traction = self.score_traction(candidate);
        let market = self.score_market(candidate);
        let fit = self.score_fit(candidate, thesis);

        let overall = round1(
            team * self.config.team_weight
                + traction * self.config.traction_weight
                + market * self.config.market_weight
                + fit * self.config.fit_weight,
        );

        let breakout_probability = self.breakout_probability(
            team,
            traction,
            market,
            candidate.batch.is_some(),
            1,
            candidate.signals.len(),
        );

        Score {
            overall,
            breakdown: ScoreBreakdown {
                team: round1(team),
                traction: round1(traction),
                market: round1(market),
                fit: round1(fit),
            },
            breakout_probability,
            fit_score: thesis.map(|_| round1(fit)),
            fit_explanation: self.fit_explanation(candidate, thesis, fit),
        }
    }

    /// Founding-team subscore: base 50, bonuses per founder background.
    fn score_team(&self, candidate: &Candidate) -> f64 {
        let mut score = 50.0;

        if candidate.founders.is_empty() {
            return score;
        }

        for founder in &candidate.founders {
            let background = founder
                .background
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();

            if self
                .config
                .notable_employers
                .iter()
                .any(|e| background.contains(e))
            {
                score += 10.0;
            }
            if self
                .config
                .notable_schools
                .iter()
                .any(|s| background.contains(s))
            {
                score += 8.0;
            }
            if background.contains("phd") || background.contains("ph.d") {
                score += 5.0;
            }
            if background.contains("serial") || background.contains("exit") {
                score += 10.0;
            }

            let role = founder.role.to_lowercase();
            if role.contains("cto") || role.contains("technical") {
                score += 5.0;
            }
            if founder.linkedin.is_some() {
                score += 2.0;
            }
        }

        if candidate.founders.len() >= 2 {
            score += 5.0;
        }

        score.min(100.0)
    }

    /// Traction subscore from revenue/growth/users metrics and signals.
    ///
    /// Without metrics the candidate stays at the base score; signal
    /// bonuses only apply on top of a metrics record.
    fn score_traction(&self, candidate: &Candidate) -> f64 {
        let mut score = 50.0;

        let Some(ref metrics) = candidate.metrics else {
            return score;
        };

        if let Some(ref revenue) = metrics.revenue {
            let revenue = revenue.to_lowercase();
            if revenue.contains('m') {
                let cleaned = revenue
                    .replace('$', "")
                    .replace("arr", "")
                    .replace('m', "");
                score += match cleaned.trim().parse::<f64>() {
                    Ok(amount) if amount >= 10.0 => 30.0,
                    Ok(amount) if amount >= 5.0 => 25.0,
                    Ok(amount) if amount >= 1.0 => 20.0,
                    Ok(_) => 10.0,
                    Err(_) => 10.0,
                };
            } else if revenue.contains('k') {
                score += 5.0;
            }
        }

        if let Some(ref growth) = metrics.growth {
            let cleaned = growth
                .to_lowercase()
                .replace('+', "")
                .replace('%', "")
                .replace("yoy", "");
            score += match cleaned.trim().parse::<f64>() {
                Ok(growth) if growth >= 200.0 => 25.0,
                Ok(growth) if growth >= 100.0 => 20.0,
                Ok(growth) if growth >= 50.0 => 15.0,
                Ok(_) => 5.0,
                Err(_) => 5.0,
            };
        }

        if let Some(ref users) = metrics.users {
            let users = users.to_lowercase();
            if users.contains("enterprise") || users.contains("fortune") {
                score += 15.0;
            } else if users.contains("client") || users.contains("customer") {
                score += 10.0;
            }
        }

        for signal in &candidate.signals {
            let signal = signal.to_lowercase();
            if signal.contains("y combinator") || signal.contains("yc") {
                score += 10.0;
            }
            if signal.contains("techcrunch") || signal.contains("featured") {
                score += 5.0;
            }
            if signal.contains("partnership") {
                score += 8.0;
            }
            if signal.contains("grew") || signal.contains("growth") {
                score += 5.0;
            }
        }

        score.min(100.0)
    }

    /// Market subscore from sector heat, stage upside, and location.
    fn score_market(&self, candidate: &Candidate) -> f64 {
        let mut score = 60.0;

        let sector = candidate.sector.to_lowercase();
        if let Some((_, bonus)) = self
            .config
            .hot_sectors
            .iter()
            .find(|(s, _)| sector.contains(s))
        {
            score += bonus;
        }

        let stage = candidate.stage.to_lowercase();
        if let Some((_, bonus)) = self
            .config
            .stage_potential
            .iter()
            .find(|(s, _)| stage.contains(s))
        {
            score += bonus;
        }

        let location = candidate
            .location
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if self.config.hub_cities.iter().any(|c| location.contains(c)) {
            score += 5.0;
        }

        if candidate.batch.is_some() {
            score += 10.0;
        }

        score.min(100.0)
    }

    /// Thesis-fit subscore. Defaults to 70 when no thesis is configured.
    fn score_fit(&self, candidate: &Candidate, thesis: Option<&ThesisFilter>) -> f64 {
        let Some(thesis) = thesis else {
            return 70.0;
        };

        let mut score: f64 = 50.0;
        let sector = candidate.sector.to_lowercase();
        let stage = candidate.stage.to_lowercase();
        let location = candidate
            .location
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if thesis.sectors.iter().any(|t| {
            let t = t.to_lowercase();
            sector.contains(&t) || t.contains(&sector)
        }) {
            score += 20.0;
        }

        if thesis
            .stages
            .iter()
            .any(|t| stage.contains(&t.to_lowercase()))
        {
            score += 20.0;
        }

        if thesis
            .geographies
            .iter()
            .any(|g| location.contains(&g.to_lowercase()))
        {
            score += 15.0;
        }

        if thesis
            .anti_portfolio
            .iter()
            .any(|a| sector.contains(&a.to_lowercase()))
        {
            score -= 30.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// Breakout probability from the team/traction/market subscores plus
    /// visibility bonuses, capped at 99.
    ///
    /// `source_count` is the number of distinct provenance records; a
    /// freshly-fetched candidate always carries one, but merged results can
    /// be rescored with more.
    pub fn breakout_probability(
        &self,
        team: f64,
        traction: f64,
        market: f64,
        accelerator_alumnus: bool,
        source_count: usize,
        signal_count: usize,
    ) -> f64 {
        let base = (team * 0.35 + traction * 0.35 + market * 0.30) * 0.9;

        let mut adjustments = 0.0;
        if accelerator_alumnus {
            adjustments += 15.0;
        }
        if source_count >= 3 {
            adjustments += 5.0;
        }
        if signal_count >= 4 {
            adjustments += 5.0;
        }

        round1((base + adjustments).min(99.0))
    }

    /// Human-readable fit summary, prefixed by a fit bucket and listing the
    /// thesis dimensions that matched.
    fn fit_explanation(
        &self,
        candidate: &Candidate,
        thesis: Option<&ThesisFilter>,
        fit: f64,
    ) -> String {
        let Some(thesis) = thesis else {
            return format!(
                "Score: {fit}/100. Configure your fund thesis for personalized fit analysis."
            );
        };

        let sector = candidate.sector.to_lowercase();
        let stage = candidate.stage.to_lowercase();
        let location = candidate
            .location
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let mut matches = Vec::new();
        if let Some(t) = thesis.sectors.iter().find(|t| {
            let t = t.to_lowercase();
            sector.contains(&t) || t.contains(&sector)
        }) {
            matches.push(format!("{t} thesis"));
        }
        if let Some(t) = thesis
            .stages
            .iter()
            .find(|t| stage.contains(&t.to_lowercase()))
        {
            matches.push(format!("{t} stage"));
        }
        if let Some(g) = thesis
            .geographies
            .iter()
            .find(|g| location.contains(&g.to_lowercase()))
        {
            matches.push(format!("{g} geography"));
        }

        let prefix = if fit >= 85.0 {
            "Perfect match"
        } else if fit >= 70.0 {
            "Strong fit"
        } else if fit >= 50.0 {
            "Moderate fit"
        } else {
            "Limited fit"
        };

        if matches.is_empty() {
            format!("{prefix}: {} in {}", candidate.sector, candidate.stage)
        } else {
            format!("{prefix}: {}", matches.join(", "))
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
