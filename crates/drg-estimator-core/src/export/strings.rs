//! Built-in UI text for estimate lines and messages.

use crate::calculator::EstimateError;
use crate::models::{BreakdownCategory, Locale};

/// Top-level lines of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostLine {
    DrgRevenue,
    Nursing,
    Room,
    Chief,
    Supplement,
    Total,
}

impl CostLine {
    pub fn key(self) -> &'static str {
        match self {
            Self::DrgRevenue => "drg_revenue",
            Self::Nursing => "nursing_cost",
            Self::Room => "room_cost",
            Self::Chief => "chief_cost",
            Self::Supplement => "supplement_cost",
            Self::Total => "total",
        }
    }
}

pub fn cost_line_label(line: CostLine, locale: Locale) -> &'static str {
    use CostLine::*;
    match (locale, line) {
        (Locale::En, DrgRevenue) => "DRG revenue",
        (Locale::En, Nursing) => "Nursing",
        (Locale::En, Room) => "Room",
        (Locale::En, Chief) => "Chief physician",
        (Locale::En, Supplement) => "Fixed supplement",
        (Locale::En, Total) => "Total",

        (Locale::Ru, DrgRevenue) => "Доход по DRG",
        (Locale::Ru, Nursing) => "Сестринский уход",
        (Locale::Ru, Room) => "Палата",
        (Locale::Ru, Chief) => "Главный врач",
        (Locale::Ru, Supplement) => "Фиксированная надбавка",
        (Locale::Ru, Total) => "Итого",

        (Locale::Pl, DrgRevenue) => "Przychód DRG",
        (Locale::Pl, Nursing) => "Opieka pielęgniarska",
        (Locale::Pl, Room) => "Sala",
        (Locale::Pl, Chief) => "Ordynator",
        (Locale::Pl, Supplement) => "Dopłata stała",
        (Locale::Pl, Total) => "Razem",

        (Locale::Ar, DrgRevenue) => "إيراد DRG",
        (Locale::Ar, Nursing) => "التمريض",
        (Locale::Ar, Room) => "الغرفة",
        (Locale::Ar, Chief) => "رئيس الأطباء",
        (Locale::Ar, Supplement) => "رسوم إضافية ثابتة",
        (Locale::Ar, Total) => "الإجمالي",
    }
}

pub fn category_label(category: BreakdownCategory, locale: Locale) -> &'static str {
    use BreakdownCategory::*;
    match locale {
        Locale::En => match category {
            Nursing => "Nursing",
            Icu => "Intensive care",
            Diagnostics => "Diagnostics",
            Surgery => "Surgery",
            Anesthesia => "Anesthesia",
            DeliveryRoom => "Delivery room",
            CardiacDiagnostics => "Cardiac diagnostics",
            Endoscopy => "Endoscopy",
            Radiology => "Radiology",
            Lab => "Laboratory",
            DiagnosticArea => "Diagnostic area",
            TherapeuticArea => "Therapeutic area",
            Admission => "Admission",
        },
        Locale::Ru => match category {
            Nursing => "Сестринский уход",
            Icu => "Реанимация",
            Diagnostics => "Диагностика",
            Surgery => "Хирургия",
            Anesthesia => "Анестезия",
            DeliveryRoom => "Родильный зал",
            CardiacDiagnostics => "Кардиодиагностика",
            Endoscopy => "Эндоскопия",
            Radiology => "Радиология",
            Lab => "Лаборатория",
            DiagnosticArea => "Диагностическое отделение",
            TherapeuticArea => "Терапевтическое отделение",
            Admission => "Госпитализация",
        },
        Locale::Pl => match category {
            Nursing => "Opieka pielęgniarska",
            Icu => "Intensywna terapia",
            Diagnostics => "Diagnostyka",
            Surgery => "Chirurgia",
            Anesthesia => "Anestezja",
            DeliveryRoom => "Sala porodowa",
            CardiacDiagnostics => "Diagnostyka kardiologiczna",
            Endoscopy => "Endoskopia",
            Radiology => "Radiologia",
            Lab => "Laboratorium",
            DiagnosticArea => "Obszar diagnostyczny",
            TherapeuticArea => "Obszar terapeutyczny",
            Admission => "Przyjęcie",
        },
        Locale::Ar => match category {
            Nursing => "التمريض",
            Icu => "العناية المركزة",
            Diagnostics => "التشخيص",
            Surgery => "الجراحة",
            Anesthesia => "التخدير",
            DeliveryRoom => "غرفة الولادة",
            CardiacDiagnostics => "تشخيص القلب",
            Endoscopy => "التنظير",
            Radiology => "الأشعة",
            Lab => "المختبر",
            DiagnosticArea => "المنطقة التشخيصية",
            TherapeuticArea => "المنطقة العلاجية",
            Admission => "الدخول",
        },
    }
}

/// Inline message for a failed calculation.
pub fn error_message(error: &EstimateError, locale: Locale) -> &'static str {
    match (error, locale) {
        (EstimateError::MissingSelection, Locale::En) => "No treatment code selected.",
        (EstimateError::MissingSelection, Locale::Ru) => "Не выбран код лечения.",
        (EstimateError::MissingSelection, Locale::Pl) => "Nie wybrano kodu leczenia.",
        (EstimateError::MissingSelection, Locale::Ar) => "لم يتم اختيار رمز العلاج.",
        (EstimateError::InvalidRate, Locale::En) => "Base rate must be provided.",
        (EstimateError::InvalidRate, Locale::Ru) => "Укажите базовую ставку.",
        (EstimateError::InvalidRate, Locale::Pl) => "Podaj stawkę bazową.",
        (EstimateError::InvalidRate, Locale::Ar) => "يجب إدخال السعر الأساسي.",
    }
}

/// Message shown instead of the estimator when reference data failed to load.
pub fn unavailable_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Cost data is currently unavailable. Please reload the page.",
        Locale::Ru => "Данные о стоимости сейчас недоступны. Обновите страницу.",
        Locale::Pl => "Dane o kosztach są obecnie niedostępne. Odśwież stronę.",
        Locale::Ar => "بيانات التكلفة غير متاحة حالياً. يرجى إعادة تحميل الصفحة.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_text_in_every_locale() {
        for locale in [Locale::En, Locale::Ru, Locale::Pl, Locale::Ar] {
            for category in BreakdownCategory::ALL {
                assert!(!category_label(category, locale).is_empty());
            }
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            error_message(&EstimateError::InvalidRate, Locale::En),
            "Base rate must be provided."
        );
        assert_eq!(
            error_message(&EstimateError::MissingSelection, Locale::Pl),
            "Nie wybrano kodu leczenia."
        );
    }
}
