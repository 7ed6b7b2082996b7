//! Form state for the TUI, kept free of terminal types so it can be tested.
//!
//! Any input change returns the form to `Idle`: a result is only shown for the
//! inputs it was computed from.

use crate::app::predictor::Predictor;
use crate::domain::{ExperienceRange, Level, Prediction, ROLES};
use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Level,
    Years,
    Role,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Level, Field::Years, Field::Role];

    pub fn index(self) -> usize {
        match self {
            Field::Level => 0,
            Field::Years => 1,
            Field::Role => 2,
        }
    }

    fn up(self) -> Field {
        match self {
            Field::Level | Field::Years => Field::Level,
            Field::Role => Field::Years,
        }
    }

    fn down(self) -> Field {
        match self {
            Field::Level => Field::Years,
            Field::Years | Field::Role => Field::Role,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Predicting,
    ResultShown(Prediction),
    ErrorShown(String),
}

#[derive(Debug, Clone)]
pub struct Form {
    level: Level,
    years: u32,
    role_idx: usize,
    selected: Field,
    state: FormState,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        let level = Level::ALL[0];
        Self {
            level,
            years: level.experience_range().min,
            role_idx: 0,
            selected: Field::Level,
            state: FormState::Idle,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn role(&self) -> &'static str {
        ROLES[self.role_idx]
    }

    pub fn selected(&self) -> Field {
        self.selected
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn bounds(&self) -> ExperienceRange {
        self.level.experience_range()
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.up();
    }

    pub fn select_down(&mut self) {
        self.selected = self.selected.down();
    }

    /// Step the selected field by one.
    pub fn adjust(&mut self, forward: bool) {
        match self.selected {
            Field::Level => {
                let next = if forward { self.level.next() } else { self.level.prev() };
                self.set_level(next);
            }
            Field::Years => {
                let next = if forward {
                    self.years.saturating_add(1)
                } else {
                    self.years.saturating_sub(1)
                };
                self.set_years(next);
            }
            Field::Role => {
                let n = ROLES.len();
                self.role_idx = if forward {
                    (self.role_idx + 1) % n
                } else {
                    (self.role_idx + n - 1) % n
                };
                self.state = FormState::Idle;
            }
        }
    }

    /// Change level; the slider restarts at the new level's minimum.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.years = level.experience_range().min;
        self.state = FormState::Idle;
    }

    /// Set years, clamped to the current level's bounds.
    pub fn set_years(&mut self, years: u32) {
        self.years = self.bounds().clamp(years);
        self.state = FormState::Idle;
    }

    pub fn set_role(&mut self, role: &str) -> bool {
        match ROLES.iter().position(|r| *r == role) {
            Some(idx) => {
                self.role_idx = idx;
                self.state = FormState::Idle;
                true
            }
            None => false,
        }
    }

    /// Run the predictor for the current inputs.
    ///
    /// Value errors are shown inline; anything else is returned to the caller.
    pub fn submit(&mut self, predictor: &Predictor) -> Result<(), AppError> {
        self.state = FormState::Predicting;
        match predictor.predict_salaries(f64::from(self.years), self.level.label(), self.role()) {
            Ok(prediction) => {
                self.state = FormState::ResultShown(prediction);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::Value => {
                tracing::error!(error = %err, "Prediction failed");
                self.state = FormState::ErrorShown(format!("Error: {err}"));
                Ok(())
            }
            Err(err) => {
                self.state = FormState::Idle;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::artifacts::demo_artifacts;
    use crate::models::{LinearRegressor, Regressor};

    fn predictor() -> Predictor {
        Predictor::new(demo_artifacts().unwrap())
    }

    #[test]
    fn starts_idle_at_first_level_minimum() {
        let form = Form::new();
        assert_eq!(form.level(), Level::Associate);
        assert_eq!(form.years(), 0);
        assert_eq!(form.role(), ROLES[0]);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn bounds_follow_selected_level() {
        let mut form = Form::new();
        for level in Level::ALL {
            form.set_level(level);
            assert_eq!(form.bounds(), level.experience_range());
            assert_eq!(form.years(), level.experience_range().min);
        }
    }

    #[test]
    fn slider_never_leaves_level_bounds() {
        let mut form = Form::new();
        for level in Level::ALL {
            form.set_level(level);
            let r = level.experience_range();
            form.set_years(u32::MAX);
            assert_eq!(form.years(), r.max);
            form.set_years(0);
            assert_eq!(form.years(), r.min);

            form.select_down();
            for _ in 0..30 {
                form.adjust(true);
                assert!(r.contains(form.years()));
            }
            for _ in 0..30 {
                form.adjust(false);
                assert!(r.contains(form.years()));
            }
            form.select_up();
        }
    }

    #[test]
    fn level_change_resets_years_into_new_bounds() {
        let mut form = Form::new();
        form.set_level(Level::Manager);
        form.set_years(20);
        form.set_level(Level::Junior);
        assert_eq!(form.years(), 0);
        assert!(form.bounds().contains(form.years()));
    }

    #[test]
    fn field_navigation_saturates() {
        let mut form = Form::new();
        form.select_up();
        assert_eq!(form.selected(), Field::Level);
        form.select_down();
        form.select_down();
        form.select_down();
        assert_eq!(form.selected(), Field::Role);
    }

    #[test]
    fn role_cycles_both_ways() {
        let mut form = Form::new();
        form.select_down();
        form.select_down();
        form.adjust(false);
        assert_eq!(form.role(), ROLES[ROLES.len() - 1]);
        form.adjust(true);
        assert_eq!(form.role(), ROLES[0]);
    }

    #[test]
    fn submit_shows_result_then_input_change_clears_it() {
        let pred = predictor();
        let mut form = Form::new();
        form.set_level(Level::Mid);
        form.set_years(5);
        assert!(form.set_role("Data Scientist"));
        form.submit(&pred).unwrap();

        let FormState::ResultShown(p) = form.state() else {
            panic!("expected a result, got {:?}", form.state());
        };
        assert_eq!(p.level, "Mid");
        assert_eq!(p.role, "Data Scientist");
        assert_eq!(p.years_of_experience, 5.0);

        form.set_years(6);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn value_error_is_shown_inline() {
        let mut set = demo_artifacts().unwrap();
        set.avg_model = Regressor::Linear(LinearRegressor {
            n_features: 4,
            intercept: 0.0,
            coefficients: vec![0.0; 4],
        });
        let pred = Predictor::new(set);
        let mut form = Form::new();
        form.submit(&pred).unwrap();

        let FormState::ErrorShown(msg) = form.state() else {
            panic!("expected an error, got {:?}", form.state());
        };
        assert!(msg.starts_with("Error: "));
    }

    #[test]
    fn unknown_role_is_not_selectable() {
        let mut form = Form::new();
        assert!(!form.set_role("Astronaut"));
        assert_eq!(form.role(), ROLES[0]);
    }
}
