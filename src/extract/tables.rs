//! Vocabulary tables and the expressions compiled from them.
//!
//! Each partial word accepts any prefix of the full word down to the shortest one that is still
//! unambiguous in its table.

use std::sync::OnceLock;

use chrono::Weekday;
use regex::{Captures, Regex};

use crate::pattern::{compile, Matcher, Pattern, PatternSet};

use super::Unit;

fn leading_number(captures: &Captures<'_>) -> Option<u32> {
    captures.get(1)?.as_str().parse().ok()
}

fn whole_number(captures: &Captures<'_>) -> Option<u32> {
    captures.get(0)?.as_str().parse().ok()
}

const ORDINAL_NAMES: [Pattern<u32>; 12] = [
    Pattern::literal("fir_st", "fir(?:s|st)?", 1),
    Pattern::literal("sec_ond", "sec(?:o|on|ond)?", 2),
    Pattern::literal("thi_rd", "thi(?:r|rd)?", 3),
    Pattern::literal("fou_rth", "fou(?:r|rt|rth)?", 4),
    Pattern::literal("fif_th", "fif(?:t|th)?", 5),
    Pattern::literal("six_th", "six(?:t|th)?", 6),
    Pattern::literal("sev_enth", "sev(?:e|en|ent|enth)?", 7),
    Pattern::literal("eig_hth", "eig(?:h|ht|hth)?", 8),
    Pattern::literal("nin_th/nin_eth", "nin(?:t|th|e|et|eth)?", 9),
    Pattern::literal("ten_th", "ten(?:t|th)", 10),
    Pattern::literal("ele_venth", "ele(?:v|ve|ven|vent|venth)?", 11),
    Pattern::literal(
        "twel_fth/twel_veth",
        r"\btwel(?:v|ve|vet|veth|f|ft|fth)?\b",
        12,
    ),
];

const CARDINAL_NAMES: [Pattern<u32>; 12] = [
    Pattern::literal("one", "one|a|an", 1),
    Pattern::literal("two", "two", 2),
    Pattern::literal("thr_ee", "thr(?:e|ee)?", 3),
    Pattern::literal("fou_r", "fou(?:r)?", 4),
    Pattern::literal("fiv_e", "fiv(?:e)?", 5),
    Pattern::literal("six", "six", 6),
    Pattern::literal("sev_en", "sev(?:e|en)?", 7),
    Pattern::literal("eig_ht", "eig(?:h|ht)?", 8),
    Pattern::literal("nin_e", "nin(?:e)?", 9),
    Pattern::literal("ten", "ten", 10),
    Pattern::literal("ele_ven", "ele(?:v|ve|ven)?", 11),
    Pattern::literal("twel_ve", "twel(?:v|ve)?", 12),
];

const ORDINAL_DIGITS: Pattern<u32> =
    Pattern::derived("d+_th", r"(\d+)(?:st|nd|rd|th)", leading_number);

const DAY_DIGITS: [Pattern<u32>; 2] = [
    Pattern::derived(
        "1-31th",
        r"([1-9]|[1-2][0-9]|3[01])(?:st|nd|rd|th)",
        leading_number,
    ),
    Pattern::derived("13-31", r"(1[3-9]|2[0-9]|3[01])", leading_number),
];

// Up to 9999; the per-unit bounds are checked after matching.
const AMOUNT_DIGITS: Pattern<u32> = Pattern::derived(r"\d+", r"0*(0|[1-9]\d{0,3})", whole_number);

const SOLE_AMOUNT_DIGITS: Pattern<u32> =
    Pattern::derived(r"\d+", r"0*([1-9]\d{0,2})", whole_number);

const DURATIONS: [Pattern<Unit>; 5] = [
    Pattern::literal("days/dys/ds", "d|da$|day|days|dy|dys|ds", Unit::Day),
    Pattern::literal(
        "weeks/wks/ws",
        "w|we$|wee$|week|weeks|wk|wks|ws",
        Unit::Week,
    ),
    Pattern::literal("m", "m", Unit::Month),
    Pattern::literal(
        "months/mths/ms",
        "mo$|mont$|month|months|mth|mths|ms",
        Unit::Month,
    ),
    Pattern::literal(
        "years/yrs/ys",
        "y|ye$|yea$|year|years|yr|yrs|ys",
        Unit::Year,
    ),
];

const MONTHS: [Pattern<u32>; 12] = [
    Pattern::literal("jan_uary", "jan(?:u|ua|uar|uary)?", 1),
    Pattern::literal("feb_ruary", "feb(?:r|ru|rua|ruar|ruary)?", 2),
    Pattern::literal("mar_ch", "mar(?:c|ch)?", 3),
    Pattern::literal("apr_il", "apr(?:i|il)?", 4),
    Pattern::literal("may", "may", 5),
    Pattern::literal("jun_e", "jun(?:e)?", 6),
    Pattern::literal("jul_y", "jul(?:y)?", 7),
    Pattern::literal("aug_ust", "aug(?:u|us|ust)?", 8),
    Pattern::literal("sep_tember", "sep(?:t|te|tem|temb|tembe|tember)?", 9),
    Pattern::literal("oct_ober", "oct(?:o|ob|obe|ober)?", 10),
    Pattern::literal("nov_ember", "nov(?:e|em|emb|embe|ember)?", 11),
    Pattern::literal("dec_ember", "dec(?:e|em|emb|embe|ember)?", 12),
];

const MONTH_PREFIXES: [Pattern<u32>; 12] = [
    Pattern::literal("ja(nuary", "j|ja", 1),
    Pattern::literal("fe(bruary", "f|fe", 2),
    Pattern::literal("ma(rch", "m|ma", 3),
    Pattern::literal("ap(ril", "a|ap", 4),
    Pattern::literal("ma(y", "m|ma", 5),
    Pattern::literal("ju(ne", "j|ju", 6),
    Pattern::literal("ju(ly", "j|ju", 7),
    Pattern::literal("au(gust", "a|au", 8),
    Pattern::literal("se(ptember", "s|se", 9),
    Pattern::literal("oc(tober", "o|oc", 10),
    Pattern::literal("no(vember", "n|no", 11),
    Pattern::literal("de(cember", "d|de", 12),
];

const WEEKDAYS: [Pattern<Weekday>; 7] = [
    Pattern::literal("mon_day", "mon(?:d|da|day)?", Weekday::Mon),
    Pattern::literal("tue_sday", "tue(?:s|sd|sda|sday)?", Weekday::Tue),
    Pattern::literal(
        "wed_nesday",
        "wed(?:n|ne|nes|nesd|nesda|nesday)?",
        Weekday::Wed,
    ),
    Pattern::literal("thu_rsday", "thu(?:r|rs|rsd|rsda|rsday)?", Weekday::Thu),
    Pattern::literal("fri_day", "fri(?:d|da|day)?", Weekday::Fri),
    Pattern::literal("sat_urday", "sat(?:u|ur|urd|urda|urday)?", Weekday::Sat),
    Pattern::literal("sun_day", "sun(?:d|da|day)?", Weekday::Sun),
];

const WEEKDAY_PREFIXES: [Pattern<Weekday>; 7] = [
    Pattern::literal("mo(nday", "m|mo", Weekday::Mon),
    Pattern::literal("tu(esday", "t|tu", Weekday::Tue),
    Pattern::literal("we(dnesday", "w|we", Weekday::Wed),
    Pattern::literal("th(ursday", "t|th", Weekday::Thu),
    Pattern::literal("fr(iday", "f|fr", Weekday::Fri),
    Pattern::literal("sa(turday", "s|sa", Weekday::Sat),
    Pattern::literal("su(nday", "s|su", Weekday::Sun),
];

const PAST_MARKERS: [Pattern<bool>; 3] = [
    Pattern::literal("before", "bef|befo|befor|before", true),
    Pattern::literal("ago", "ago", true),
    Pattern::literal("earlier", "ear|earl|earli|earlie|earlier", true),
];

/// Every compiled table and expression the extractors use.
pub(super) struct Tables {
    pub year: Regex,
    pub day_or_month: Regex,
    pub day_certain: Matcher<u32>,
    pub month_certain: Matcher<u32>,
    pub month_partial: Matcher<u32>,
    pub weekday_partial: Matcher<Weekday>,
    pub sole_amount: Matcher<u32>,
    pub ordinals: PatternSet<u32>,
    pub weekdays: PatternSet<Weekday>,
    pub durations: PatternSet<Unit>,
    pub amounts: PatternSet<u32>,
    /// `ordinal? weekday`
    pub ordinal_weekday: Regex,
    /// `ordinal unit`
    pub ordinal_duration: Regex,
    /// First `amount unit` term anywhere in the text.
    pub amount_first: Regex,
    /// Further `amount unit` terms, optionally joined with "and".
    pub amount_followed: Regex,
    pub past_suffix: Regex,
}

/// The process-wide compiled tables.
pub(super) fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::new)
}

impl Tables {
    fn new() -> Self {
        log::debug!("Compiling date vocabulary tables...");

        let ordinals = PatternSet::new(ORDINAL_NAMES.into_iter().chain([ORDINAL_DIGITS]));
        let weekdays = PatternSet::new(WEEKDAYS);
        let durations = PatternSet::new(DURATIONS);
        let cardinals = PatternSet::new(CARDINAL_NAMES);
        let amount_digits = PatternSet::new([AMOUNT_DIGITS]);
        let amounts = PatternSet::new(CARDINAL_NAMES.into_iter().chain([AMOUNT_DIGITS]));

        let ordinal_weekday = compile(&format!(
            r"\b(?:(?:{})\s+)?(?:{})\b",
            ordinals.alternation(),
            weekdays.alternation()
        ));
        let ordinal_duration = compile(&format!(
            r"\b(?:{})\s+(?:{})\b",
            ordinals.alternation(),
            durations.alternation()
        ));
        let amount_term = format!(
            r"\b(?:(?:{})\s|{})\s*(?:{})\b",
            cardinals.alternation(),
            amount_digits.alternation(),
            durations.alternation()
        );
        let amount_first = compile(&amount_term);
        let amount_followed = compile(&format!(r"^(?:\s*|\s*and\s*){amount_term}"));

        let past = PatternSet::new(PAST_MARKERS);
        let past_suffix = compile(&format!(r"^\s*\b(?:{})\b", past.alternation()));

        Self {
            year: compile(r"\b(2\d\d\d|19\d\d)\b"),
            day_or_month: compile(r"\b(0?[1-9]|10|11|12)\b"),
            day_certain: Matcher::new(
                PatternSet::new(ORDINAL_NAMES.into_iter().chain(DAY_DIGITS)),
                |alt| format!(r"\b(?:{alt})\b"),
            ),
            month_certain: Matcher::new(PatternSet::new(MONTHS), |alt| format!(r"\b(?:{alt})\b")),
            month_partial: Matcher::new(PatternSet::new(MONTH_PREFIXES), |alt| {
                format!(r"\b(?:{alt})$")
            }),
            weekday_partial: Matcher::new(PatternSet::new(WEEKDAY_PREFIXES), |alt| {
                format!(r"^\s*(?:{alt})$")
            }),
            sole_amount: Matcher::new(
                PatternSet::new(CARDINAL_NAMES.into_iter().chain([SOLE_AMOUNT_DIGITS])),
                |alt| format!(r"^\s*(?:{alt})\s*$"),
            ),
            ordinals,
            weekdays,
            durations,
            amounts,
            ordinal_weekday,
            ordinal_duration,
            amount_first,
            amount_followed,
            past_suffix,
        }
    }
}
