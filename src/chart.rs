// 🧮 Chart Assembly
// Full numerology chart from (name, birth date, as-of date)
//
// Everything except age, personal year/month and the current quarterly
// cycles is independent of the as-of date. Those "current" values move with
// the calendar, so the as-of date is always passed in explicitly.

use crate::birth_date::BirthDate;
use crate::error::NumerologyError;
use crate::reduction::{name_to_number, reduce, reduce_number, NameFilter};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Realization 1 ends at this age minus the destiny path
pub const REALIZATION_BASE_AGE: i32 = 36;

/// Span of realizations 2 and 3, in years
pub const REALIZATION_SPAN: i32 = 9;

/// Year used for forward-looking predictions
pub const DEFAULT_FORECAST_YEAR: i32 = 2026;

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Fixed year for the forecast personal year (the next year is derived)
    pub forecast_year: i32,

    /// Force-reduce a master destiny path (11 → 2) before computing
    /// realization ages. Off: a destiny of 11 ends realization 1 at 25.
    pub reduce_master_destiny_for_ages: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            forecast_year: DEFAULT_FORECAST_YEAR,
            reduce_master_destiny_for_ages: false,
        }
    }
}

// ============================================================================
// CHART PARTS
// ============================================================================

/// Day, month and year each reduced on their own (masters preserved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedDate {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl ReducedDate {
    pub fn from_birth_date(date: &BirthDate) -> Self {
        ReducedDate {
            day: reduce(date.day),
            month: reduce(date.month),
            year: reduce(date.year.unsigned_abs()),
        }
    }

    /// Personal year for a given calendar year
    pub fn personal_year(&self, calendar_year: i32) -> u32 {
        reduce(self.day + self.month + reduce(calendar_year.unsigned_abs()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeCycles {
    /// Reduced month
    pub c1: u32,
    /// Reduced day
    pub c2: u32,
    /// Reduced year
    pub c3: u32,
}

/// The four realizations (pinnacles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realizations {
    pub r1: u32,
    pub r2: u32,
    pub r3: u32,
    pub r4: u32,
}

impl Realizations {
    pub fn from_reduced(reduced: &ReducedDate) -> Self {
        let r1 = reduce(reduced.day + reduced.month);
        let r2 = reduce(reduced.day + reduced.year);
        Realizations {
            r1,
            r2,
            r3: reduce(r1 + r2),
            r4: reduce(reduced.month + reduced.year),
        }
    }

    pub fn value(&self, index: RealizationIndex) -> u32 {
        match index {
            RealizationIndex::First => self.r1,
            RealizationIndex::Second => self.r2,
            RealizationIndex::Third => self.r3,
            RealizationIndex::Fourth => self.r4,
        }
    }
}

/// Which realization applies (1..=4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RealizationIndex {
    First,
    Second,
    Third,
    Fourth,
}

impl RealizationIndex {
    pub fn number(&self) -> u8 {
        match self {
            RealizationIndex::First => 1,
            RealizationIndex::Second => 2,
            RealizationIndex::Third => 3,
            RealizationIndex::Fourth => 4,
        }
    }
}

impl TryFrom<u8> for RealizationIndex {
    type Error = NumerologyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RealizationIndex::First),
            2 => Ok(RealizationIndex::Second),
            3 => Ok(RealizationIndex::Third),
            4 => Ok(RealizationIndex::Fourth),
            other => Err(NumerologyError::InvalidRealizationIndex(other)),
        }
    }
}

impl From<RealizationIndex> for u8 {
    fn from(index: RealizationIndex) -> Self {
        index.number()
    }
}

/// Last age (inclusive) of realizations 1-3; realization 4 runs indefinitely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizationAges {
    pub first_ends: i32,
    pub second_ends: i32,
    pub third_ends: i32,
}

impl RealizationAges {
    pub fn from_destiny(destiny: u32, reduce_masters: bool) -> Self {
        let destiny = if reduce_masters {
            reduce_number(destiny, false)
        } else {
            destiny
        };

        let first_ends = REALIZATION_BASE_AGE - destiny as i32;
        RealizationAges {
            first_ends,
            second_ends: first_ends + REALIZATION_SPAN,
            third_ends: first_ends + 2 * REALIZATION_SPAN,
        }
    }

    pub fn index_at_age(&self, age: i32) -> RealizationIndex {
        if age <= self.first_ends {
            RealizationIndex::First
        } else if age <= self.second_ends {
            RealizationIndex::Second
        } else if age <= self.third_ends {
            RealizationIndex::Third
        } else {
            RealizationIndex::Fourth
        }
    }

    /// First age of realization 4
    pub fn fourth_begins(&self) -> i32 {
        self.third_ends + 1
    }
}

/// Challenges, always from the reduced date parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenges {
    pub d1: u32,
    pub d2: u32,
    pub d3: u32,
    /// Main challenge
    pub dm: u32,
}

impl Challenges {
    pub fn from_reduced(reduced: &ReducedDate) -> Self {
        let d1 = reduce(reduced.day.abs_diff(reduced.month));
        let d3 = reduce(reduced.month.abs_diff(reduced.year));
        Challenges {
            d1,
            d2: reduce(reduced.day.abs_diff(reduced.year)),
            d3,
            dm: reduce(d1.abs_diff(d3)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyCycles {
    pub ct1: u32,
    pub ct2: u32,
    pub ct3: u32,
    pub ct4: u32,
}

impl QuarterlyCycles {
    /// Quarter is 0-based; anything past the third quarter maps to ct4
    pub fn get(&self, quarter: usize) -> u32 {
        match quarter {
            0 => self.ct1,
            1 => self.ct2,
            2 => self.ct3,
            _ => self.ct4,
        }
    }
}

/// A personal year plus the quarterly cycles built on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalYearCycle {
    /// Calendar year the personal year was computed for
    pub reference_year: i32,
    pub personal_year: u32,
    pub next_personal_year: u32,
    #[serde(flatten)]
    pub quarterly: QuarterlyCycles,
}

impl PersonalYearCycle {
    fn build(reduced: &ReducedDate, personal_year: u32, reference_year: i32, next_personal_year: u32) -> Self {
        PersonalYearCycle {
            reference_year,
            personal_year,
            next_personal_year,
            quarterly: QuarterlyCycles {
                ct1: reduce(personal_year + reduced.month),
                ct2: reduce(personal_year + reduced.day),
                ct3: reduce(personal_year + reduced.year),
                ct4: reduce(personal_year + next_personal_year),
            },
        }
    }
}

// ============================================================================
// NUMEROLOGY CHART
// ============================================================================

/// Immutable result of a calculation, fully determined by
/// (full name, birth date, as-of date) and the chart options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyChart {
    /// Name as supplied (display only)
    pub full_name: String,
    pub birth_date: BirthDate,
    pub as_of: NaiveDate,
    pub reduced: ReducedDate,

    /// Destiny path: reduce(reduced day + reduced month + reduced year)
    #[serde(rename = "cd")]
    pub destiny: u32,

    /// Vowel sum
    #[serde(rename = "mo")]
    pub motivation: u32,

    /// Consonant sum
    #[serde(rename = "eu")]
    pub inner_self: u32,

    /// All letters
    #[serde(rename = "ex")]
    pub expression: u32,

    #[serde(rename = "merito")]
    pub merit: u32,

    pub cycles: LifeCycles,
    pub realizations: Realizations,
    pub realization_ages: RealizationAges,
    pub challenges: Challenges,

    pub age: i32,
    pub personal_month: u32,

    /// Personal year that is running on the as-of date
    pub current: PersonalYearCycle,

    /// Personal year for the fixed forecast year
    pub forecast: PersonalYearCycle,
}

impl NumerologyChart {
    pub fn personal_year(&self) -> u32 {
        self.current.personal_year
    }

    /// Realization for the chart's age, with its value
    pub fn current_realization(&self) -> (RealizationIndex, u32) {
        let index = self.realization_ages.index_at_age(self.age);
        (index, self.realizations.value(index))
    }

    /// 0-based quarter of the running personal year.
    ///
    /// The personal year starts at the birthday anniversary; every three
    /// whole months since then advance one quarter.
    pub fn current_quarter(&self) -> usize {
        let birth = &self.birth_date;
        let anniversary_year = if birth.birthday_reached(self.as_of) {
            self.as_of.year()
        } else {
            self.as_of.year() - 1
        };

        let mut months = (self.as_of.year() - anniversary_year) * 12
            + self.as_of.month() as i32
            - birth.month as i32;
        if self.as_of.day() < birth.day {
            months -= 1;
        }

        (months.max(0) / 3).min(3) as usize
    }

    pub fn current_quarterly_cycle(&self) -> u32 {
        self.current.quarterly.get(self.current_quarter())
    }

    /// Name-derived fields that came out as 0 because no letter matched.
    /// Callers treat them as "no signal" rather than as chart digits.
    pub fn missing_name_signals(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.motivation == 0 {
            missing.push("mo");
        }
        if self.inner_self == 0 {
            missing.push("eu");
        }
        if self.expression == 0 {
            missing.push("ex");
        }
        missing
    }

    pub fn has_full_name_signal(&self) -> bool {
        self.missing_name_signals().is_empty()
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartCalculator {
    options: ChartOptions,
}

impl ChartCalculator {
    pub fn new(options: ChartOptions) -> Self {
        ChartCalculator { options }
    }

    /// Parse the birth date and build the chart.
    ///
    /// Only the date's shape is checked here; run `BirthDate::validate`
    /// first when the input comes from a user.
    pub fn calculate(
        &self,
        full_name: &str,
        birth_date: &str,
        as_of: NaiveDate,
    ) -> Result<NumerologyChart, NumerologyError> {
        let birth_date = BirthDate::parse(birth_date)?;
        Ok(self.calculate_for(full_name, birth_date, as_of))
    }

    pub fn calculate_for(&self, full_name: &str, birth_date: BirthDate, as_of: NaiveDate) -> NumerologyChart {
        let reduced = ReducedDate::from_birth_date(&birth_date);

        // Two passes: each part is reduced first, then the sum is reduced
        let destiny = reduce(reduced.day + reduced.month + reduced.year);

        let motivation = name_to_number(full_name, NameFilter::Vowels);
        let inner_self = name_to_number(full_name, NameFilter::Consonants);
        let expression = name_to_number(full_name, NameFilter::All);
        let merit = reduce(motivation + destiny);

        let cycles = LifeCycles {
            c1: reduced.month,
            c2: reduced.day,
            c3: reduced.year,
        };

        let realizations = Realizations::from_reduced(&reduced);
        let realization_ages =
            RealizationAges::from_destiny(destiny, self.options.reduce_master_destiny_for_ages);
        let challenges = Challenges::from_reduced(&reduced);

        let age = birth_date.age_on(as_of);

        // Personal year runs from birthday to birthday
        let year_for_personal_year = if birth_date.birthday_reached(as_of) {
            as_of.year()
        } else {
            as_of.year() - 1
        };
        let personal_year = reduced.personal_year(year_for_personal_year);
        let personal_month = reduce(personal_year + as_of.month());

        let current = PersonalYearCycle::build(
            &reduced,
            personal_year,
            year_for_personal_year,
            reduced.personal_year(as_of.year() + 1),
        );

        let forecast_year = self.options.forecast_year;
        let forecast = PersonalYearCycle::build(
            &reduced,
            reduced.personal_year(forecast_year),
            forecast_year,
            reduced.personal_year(forecast_year + 1),
        );

        tracing::trace!(
            birth_date = %birth_date,
            %as_of,
            destiny,
            personal_year,
            "chart calculated"
        );

        NumerologyChart {
            full_name: full_name.to_string(),
            birth_date,
            as_of,
            reduced,
            destiny,
            motivation,
            inner_self,
            expression,
            merit,
            cycles,
            realizations,
            realization_ages,
            challenges,
            age,
            personal_month,
            current,
            forecast,
        }
    }
}

/// Chart with default options
pub fn calculate_chart(
    full_name: &str,
    birth_date: &str,
    as_of: NaiveDate,
) -> Result<NumerologyChart, NumerologyError> {
    ChartCalculator::default().calculate(full_name, birth_date, as_of)
}

/// Chart as of the local wall-clock date. Meant for boundary code (CLI,
/// HTTP handlers); two calls on different days may differ in the current
/// personal year, personal month and quarterly cycles.
pub fn calculate_chart_now(full_name: &str, birth_date: &str) -> Result<NumerologyChart, NumerologyError> {
    calculate_chart(full_name, birth_date, Local::now().date_naive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> NaiveDate {
        date(2026, 10, 16)
    }

    #[test]
    fn test_known_vector_1966_05_20() {
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();

        assert_eq!(chart.reduced, ReducedDate { day: 2, month: 5, year: 4 });
        assert_eq!(chart.destiny, 11);
        assert_eq!(chart.cycles, LifeCycles { c1: 5, c2: 2, c3: 4 });
        assert_eq!(chart.realizations, Realizations { r1: 7, r2: 6, r3: 4, r4: 9 });
        assert_eq!(chart.challenges, Challenges { d1: 3, d2: 2, d3: 1, dm: 2 });
    }

    #[test]
    fn test_known_vector_1955_07_03() {
        let chart = calculate_chart("Any Name", "1955-07-03", as_of()).unwrap();

        assert_eq!(chart.reduced, ReducedDate { day: 3, month: 7, year: 2 });
        assert_eq!(chart.destiny, 3);
        assert_eq!(chart.realizations, Realizations { r1: 1, r2: 5, r3: 6, r4: 9 });
        assert_eq!(chart.challenges, Challenges { d1: 4, d2: 1, d3: 5, dm: 1 });
    }

    #[test]
    fn test_reduced_parts_not_raw_values() {
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();

        // |20 - 5| = 15 and 20 + 5 = 25 would be the raw-value bug
        assert_eq!(chart.challenges.d1, 3);
        assert_ne!(chart.challenges.d1, 15);
        assert_eq!(chart.realizations.r1, 7);
        assert_ne!(chart.realizations.r1, 25);
    }

    #[test]
    fn test_both_date_layouts_agree() {
        let iso = calculate_chart("Maria da Silva", "1966-05-20", as_of()).unwrap();
        let day_first = calculate_chart("Maria da Silva", "20/05/1966", as_of()).unwrap();
        assert_eq!(iso, day_first);
    }

    #[test]
    fn test_deterministic() {
        let a = calculate_chart("José Conceição", "1990-08-15", as_of()).unwrap();
        let b = calculate_chart("José Conceição", "1990-08-15", as_of()).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_name_numbers_and_merit() {
        // Maria da Silva: vowels 22, consonants 25 → 7, all 47 → 2
        let chart = calculate_chart("Maria da Silva", "1955-07-03", as_of()).unwrap();
        assert_eq!(chart.motivation, 22);
        assert_eq!(chart.inner_self, 7);
        assert_eq!(chart.expression, 2);
        // 22 + 3 = 25 → 7
        assert_eq!(chart.merit, 7);
    }

    #[test]
    fn test_realization_ages_master_destiny() {
        let ages = RealizationAges::from_destiny(11, false);
        assert_eq!(ages.first_ends, 25);
        assert_eq!(ages.second_ends, 34);
        assert_eq!(ages.third_ends, 43);
        assert_eq!(ages.fourth_begins(), 44);

        assert_eq!(ages.index_at_age(25), RealizationIndex::First);
        assert_eq!(ages.index_at_age(26), RealizationIndex::Second);
        assert_eq!(ages.index_at_age(35), RealizationIndex::Third);
        assert_eq!(ages.index_at_age(44), RealizationIndex::Fourth);
    }

    #[test]
    fn test_realization_ages_simple_destiny() {
        let ages = RealizationAges::from_destiny(3, false);
        assert_eq!(ages.first_ends, 33);
        assert_eq!(ages.second_ends, 42);
        assert_eq!(ages.third_ends, 51);
        assert_eq!(ages.fourth_begins(), 52);
    }

    #[test]
    fn test_realization_ages_forced_reduction_option() {
        let ages = RealizationAges::from_destiny(11, true);
        assert_eq!(ages.first_ends, 34);

        let calculator = ChartCalculator::new(ChartOptions {
            reduce_master_destiny_for_ages: true,
            ..ChartOptions::default()
        });
        let chart = calculator.calculate("Any Name", "1966-05-20", as_of()).unwrap();
        assert_eq!(chart.destiny, 11);
        assert_eq!(chart.realization_ages.first_ends, 34);
    }

    #[test]
    fn test_current_values_after_birthday() {
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();

        assert_eq!(chart.age, 60);
        // 2 + 5 + reduce(2026) = 8
        assert_eq!(chart.current.reference_year, 2026);
        assert_eq!(chart.personal_year(), 8);
        // 8 + 10 = 18 → 9
        assert_eq!(chart.personal_month, 9);
        // 2 + 5 + reduce(2027) = 9
        assert_eq!(chart.current.next_personal_year, 9);
        assert_eq!(
            chart.current.quarterly,
            QuarterlyCycles { ct1: 4, ct2: 1, ct3: 3, ct4: 8 }
        );
    }

    #[test]
    fn test_current_values_before_birthday() {
        let chart = calculate_chart("Any Name", "1966-05-20", date(2026, 3, 1)).unwrap();

        assert_eq!(chart.age, 59);
        // 2 + 5 + reduce(2025) = 16 → 7
        assert_eq!(chart.current.reference_year, 2025);
        assert_eq!(chart.personal_year(), 7);
        assert_eq!(chart.personal_month, 1);
        // next personal year follows the calendar: 2027 → 9
        assert_eq!(chart.current.next_personal_year, 9);
        assert_eq!(chart.current.quarterly.ct4, 7);
    }

    #[test]
    fn test_master_personal_year_preserved() {
        // 3 + 7 + reduce(2026) = 11
        let chart = calculate_chart("Any Name", "1955-07-03", as_of()).unwrap();
        assert_eq!(chart.personal_year(), 11);
        assert_eq!(chart.personal_month, 3);
        assert_eq!(
            chart.current.quarterly,
            QuarterlyCycles { ct1: 9, ct2: 5, ct3: 4, ct4: 5 }
        );
    }

    #[test]
    fn test_forecast_is_independent_of_as_of() {
        let early = calculate_chart("Any Name", "1966-05-20", date(2024, 1, 1)).unwrap();
        let late = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();

        assert_eq!(early.forecast, late.forecast);
        assert_eq!(late.forecast.reference_year, 2026);
        assert_eq!(late.forecast.personal_year, 8);
        assert_eq!(late.forecast.next_personal_year, 9);
        assert_eq!(
            late.forecast.quarterly,
            QuarterlyCycles { ct1: 4, ct2: 1, ct3: 3, ct4: 8 }
        );

        // the as-of independent core stays the same as well
        assert_eq!(early.destiny, late.destiny);
        assert_eq!(early.realizations, late.realizations);
        assert_eq!(early.challenges, late.challenges);
    }

    #[test]
    fn test_custom_forecast_year() {
        let calculator = ChartCalculator::new(ChartOptions {
            forecast_year: 2030,
            ..ChartOptions::default()
        });
        let chart = calculator.calculate("Any Name", "1966-05-20", as_of()).unwrap();
        // 2 + 5 + reduce(2030) = 12 → 3
        assert_eq!(chart.forecast.reference_year, 2030);
        assert_eq!(chart.forecast.personal_year, 3);
    }

    #[test]
    fn test_current_realization() {
        // destiny 11: realization 4 begins at 44, age is 60
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();
        assert_eq!(chart.current_realization(), (RealizationIndex::Fourth, 9));

        let young = calculate_chart("Any Name", "2000-05-20", as_of()).unwrap();
        assert_eq!(young.age, 26);
        assert_eq!(young.current_realization().0, young.realization_ages.index_at_age(26));
    }

    #[test]
    fn test_current_quarter() {
        let on_birthday = calculate_chart("Any Name", "1966-05-20", date(2026, 5, 20)).unwrap();
        assert_eq!(on_birthday.current_quarter(), 0);

        let chart = calculate_chart("Any Name", "1966-05-20", date(2026, 8, 19)).unwrap();
        assert_eq!(chart.current_quarter(), 0);

        let chart = calculate_chart("Any Name", "1966-05-20", date(2026, 8, 20)).unwrap();
        assert_eq!(chart.current_quarter(), 1);

        // 4 whole months after the May 20 anniversary
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();
        assert_eq!(chart.current_quarter(), 1);
        assert_eq!(chart.current_quarterly_cycle(), chart.current.quarterly.ct2);

        // day before the anniversary: last quarter of the previous personal year
        let chart = calculate_chart("Any Name", "1966-05-20", date(2026, 5, 19)).unwrap();
        assert_eq!(chart.current_quarter(), 3);
    }

    #[test]
    fn test_missing_name_signals() {
        let chart = calculate_chart("Aeiou", "1966-05-20", as_of()).unwrap();
        assert_eq!(chart.inner_self, 0);
        assert_eq!(chart.missing_name_signals(), vec!["eu"]);
        assert!(!chart.has_full_name_signal());

        let chart = calculate_chart("Maria", "1966-05-20", as_of()).unwrap();
        assert!(chart.has_full_name_signal());
    }

    #[test]
    fn test_invalid_date_format_propagates() {
        let err = calculate_chart("Maria", "20.05.1966", as_of()).unwrap_err();
        assert!(matches!(err, NumerologyError::InvalidDateFormat { .. }));

        let err = calculate_chart("Maria", "1966-05-xx", as_of()).unwrap_err();
        assert!(matches!(err, NumerologyError::InvalidDateFormat { .. }));
    }

    #[test]
    fn test_serialized_keys() {
        let chart = calculate_chart("Any Name", "1966-05-20", as_of()).unwrap();
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["cd"], 11);
        assert_eq!(json["birth_date"], "1966-05-20");
        assert_eq!(json["realizations"]["r3"], 4);
        assert_eq!(json["challenges"]["dm"], 2);
        assert_eq!(json["current"]["ct1"], 4);

        let back: NumerologyChart = serde_json::from_value(json).unwrap();
        assert_eq!(back, chart);
    }

    #[test]
    fn test_realization_index_conversion() {
        assert_eq!(RealizationIndex::try_from(2).unwrap(), RealizationIndex::Second);
        assert!(RealizationIndex::try_from(0).is_err());
        assert!(RealizationIndex::try_from(5).is_err());
        assert_eq!(u8::from(RealizationIndex::Fourth), 4);
    }
}
