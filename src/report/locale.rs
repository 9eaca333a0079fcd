use crate::error::{ReceivingError, Result};

/// Closed set of report languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ar,
}

impl Language {
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(ReceivingError::UnsupportedLanguage(other.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn code(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Localized label set for one language.
#[derive(Debug)]
pub struct Strings {
    pub title_single: &'static str,
    pub title_all: &'static str,
    pub summary_title: &'static str,
    pub order_label: &'static str,
    pub col_ordinal: &'static str,
    pub col_item: &'static str,
    pub col_category: &'static str,
    pub col_unit: &'static str,
    pub col_ordered: &'static str,
    pub col_received: &'static str,
    pub col_remaining: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub items_total: &'static str,
    pub merchants_total: &'static str,
    pub item_types_total: &'static str,
    pub received_by: &'static str,
    pub approved_by: &'static str,
    pub prepared_by: &'static str,
    pub signature: &'static str,
    pub date: &'static str,
    pub notes: &'static str,
    pub unknown_item: &'static str,
    pub default_category: &'static str,
    pub default_unit: &'static str,
}

static EN: Strings = Strings {
    title_single: "Receiving Checklist",
    title_all: "Receiving Checklist - All Merchants",
    summary_title: "Summary Across Merchants",
    order_label: "Purchase Order",
    col_ordinal: "#",
    col_item: "Item",
    col_category: "Category",
    col_unit: "Unit",
    col_ordered: "Ordered",
    col_received: "Received",
    col_remaining: "Remaining",
    phone: "Phone",
    email: "Email",
    items_total: "Items to receive",
    merchants_total: "Merchants",
    item_types_total: "Item types",
    received_by: "Received By",
    approved_by: "Approved By",
    prepared_by: "Prepared By",
    signature: "Signature",
    date: "Date",
    notes: "Notes",
    unknown_item: "Unknown",
    default_category: "Uncategorized",
    default_unit: "units",
};

static AR: Strings = Strings {
    title_single: "قائمة استلام البضائع",
    title_all: "قائمة استلام البضائع - جميع الموردين",
    summary_title: "ملخص جميع الموردين",
    order_label: "أمر الشراء",
    col_ordinal: "م",
    col_item: "الصنف",
    col_category: "الفئة",
    col_unit: "الوحدة",
    col_ordered: "المطلوب",
    col_received: "المستلم",
    col_remaining: "المتبقي",
    phone: "هاتف",
    email: "بريد إلكتروني",
    items_total: "عدد الأصناف المطلوب استلامها",
    merchants_total: "عدد الموردين",
    item_types_total: "عدد الأصناف",
    received_by: "استلمه",
    approved_by: "اعتمده",
    prepared_by: "أعده",
    signature: "التوقيع",
    date: "التاريخ",
    notes: "ملاحظات",
    unknown_item: "غير معروف",
    default_category: "غير مصنف",
    default_unit: "وحدة",
};

const ARABIC_INDIC: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Map ASCII digits to Arabic-Indic digits, leaving everything else intact.
pub fn to_arabic_indic(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            '0'..='9' => ARABIC_INDIC[(ch as usize) - ('0' as usize)],
            other => other,
        })
        .collect()
}

/// Presentation policy for one report-generation call: direction, numeral
/// set, column order, and label table. Resolved once and passed down so the
/// computed values stay language-independent.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    language: Language,
    direction: Direction,
    mirror_columns: bool,
    strings: &'static Strings,
}

impl Locale {
    pub fn resolve(language: Language) -> Self {
        match language {
            Language::En => Locale {
                language,
                direction: Direction::Ltr,
                mirror_columns: false,
                strings: &EN,
            },
            Language::Ar => Locale {
                language,
                direction: Direction::Rtl,
                mirror_columns: true,
                strings: &AR,
            },
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    /// Localize the digits of an already-formatted value.
    pub fn localize_digits(&self, s: &str) -> String {
        match self.language {
            Language::En => s.to_string(),
            Language::Ar => to_arabic_indic(s),
        }
    }

    /// Render a quantity or count in the locale's numeral set.
    pub fn format_quantity(&self, value: i64) -> String {
        self.localize_digits(&value.to_string())
    }

    pub fn mirrors_columns(&self) -> bool {
        self.mirror_columns
    }

    /// Apply the locale's column order to a logical-order cell sequence.
    /// Mirrored locales render the remaining-first layout.
    pub fn order_cells<T>(&self, mut cells: Vec<T>) -> Vec<T> {
        if self.mirror_columns {
            cells.reverse();
        }
        cells
    }
}
