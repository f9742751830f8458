use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Количество фишек в сотых долях (два знака после запятой).
///
/// Снаружи (ввод, JSON) фишки выглядят как десятичное число `12.5`,
/// внутри – целые сотые `Chips(1250)`, чтобы не ловить ошибки округления f64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

/// Ошибка разбора суммы из текста.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChipsParseError {
    #[error("Пустая сумма")]
    Empty,

    #[error("Некорректная сумма: {0}")]
    Invalid(String),

    #[error("Сумма слишком большая: {0}")]
    Overflow(String),
}

impl Chips {
    pub const ZERO: Chips = Chips(0);

    /// Сколько сотых в одной целой фишке.
    pub const SCALE: u64 = 100;

    /// Целое количество фишек (без дробной части).
    pub fn whole(amount: u64) -> Self {
        Chips(amount.saturating_mul(Self::SCALE))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Поделить сумму на `parts` равных долей с округлением до сотых (half-up).
    ///
    /// Сумма долей может отличаться от исходной на копейки.
    pub fn split_even(self, parts: usize) -> Chips {
        if parts == 0 {
            return Chips::ZERO;
        }
        let parts = parts as u64;
        Chips((self.0.saturating_mul(2) + parts) / (parts * 2))
    }

    /// Значение как f64 (для JSON и отображения).
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Обратное преобразование из f64 с округлением до сотых.
    pub fn from_f64(value: f64) -> Option<Chips> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * Self::SCALE as f64).round();
        if cents > u64::MAX as f64 {
            return None;
        }
        Some(Chips(cents as u64))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

impl FromStr for Chips {
    type Err = ChipsParseError;

    /// Разбор "12", "12.5", "12.345" (третий знак округляется half-up).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChipsParseError::Empty);
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(ChipsParseError::Invalid(s.to_string()));
        }

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| ChipsParseError::Overflow(s.to_string()))?
        };

        let digits: Vec<u64> = frac_part
            .chars()
            .map(|c| u64::from(c as u8 - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).map(|d| *d >= 5).unwrap_or(false);

        let cents = whole
            .checked_mul(Self::SCALE)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + u64::from(round_up)))
            .ok_or_else(|| ChipsParseError::Overflow(s.to_string()))?;

        Ok(Chips(cents))
    }
}

impl Serialize for Chips {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Chips::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("некорректная сумма фишек: {value}")))
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl core::iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}
