mod date;

pub(crate) use date::parse_date;
