// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor table and CO2 calculator.
//!
//! The calculator is the only place an activity's CO2 mass is computed.
//! It runs once at record-creation time; stored values are never
//! recomputed, so later factor changes leave history untouched.

use crate::error::AppError;
use crate::models::Category;

/// Immutable emission factor table, kg CO2 per unit of activity.
///
/// Injected into the calculator at construction so tests can swap in
/// alternate factors without touching call sites.
#[derive(Debug, Clone, Copy)]
pub struct EmissionFactors {
    /// kg CO2 per km driven
    pub driving: f64,
    /// kg CO2 per kWh consumed
    pub electricity: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            driving: 0.180,
            electricity: 0.300,
        }
    }
}

impl EmissionFactors {
    pub fn factor(&self, category: Category) -> f64 {
        match category {
            Category::Driving => self.driving,
            Category::Electricity => self.electricity,
        }
    }
}

/// Converts a raw activity into an emitted CO2 mass.
#[derive(Debug, Clone, Default)]
pub struct EmissionCalculator {
    factors: EmissionFactors,
}

impl EmissionCalculator {
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    /// Compute the CO2 mass in kg for an activity.
    ///
    /// Rejects non-positive amounts; never substitutes a default factor.
    /// The result is rounded half-away-from-zero to 3 decimal places.
    pub fn compute(&self, category: Category, amount: f64) -> Result<f64, AppError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "amount must be a positive number, got {}",
                amount
            )));
        }

        Ok(round3(amount * self.factors.factor(category)))
    }
}

/// Round half-away-from-zero to 3 decimal places.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_driving() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.compute(Category::Driving, 5.0).unwrap(), 0.9);
        assert_eq!(calc.compute(Category::Driving, 100.0).unwrap(), 18.0);
    }

    #[test]
    fn test_compute_electricity() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.compute(Category::Electricity, 7.0).unwrap(), 2.1);
    }

    #[test]
    fn test_compute_rounds_to_3_decimals() {
        let calc = EmissionCalculator::default();
        // 1.234 km * 0.180 = 0.22212 -> 0.222
        assert_eq!(calc.compute(Category::Driving, 1.234).unwrap(), 0.222);
        // 0.0139 km * 0.180 = 0.002502 -> 0.003 (half rounds away from zero)
        assert_eq!(calc.compute(Category::Driving, 0.0139).unwrap(), 0.003);
    }

    #[test]
    fn test_compute_rejects_non_positive_amount() {
        let calc = EmissionCalculator::default();
        assert!(matches!(
            calc.compute(Category::Driving, 0.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            calc.compute(Category::Electricity, -3.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            calc.compute(Category::Driving, f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let calc = EmissionCalculator::default();
        let first = calc.compute(Category::Driving, 12.345).unwrap();
        let second = calc.compute(Category::Driving, 12.345).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_alternate_factors() {
        let calc = EmissionCalculator::new(EmissionFactors {
            driving: 0.5,
            electricity: 1.0,
        });
        assert_eq!(calc.compute(Category::Driving, 2.0).unwrap(), 1.0);
        assert_eq!(calc.compute(Category::Electricity, 2.0).unwrap(), 2.0);
    }
}
