use std::time::Duration;

use regex::Regex;

use crate::field::Field;
use crate::order::Order;

#[derive(Clone)]
pub(crate) struct Config {
    workers: usize,
    field_separator: char,
    ignore_empty: bool,
    ignore_lines: Option<Regex>,
    field: Option<Field>,
    order: Order,
    timeout: Option<Duration>,
}

impl Config {
    pub(crate) fn new(
        workers: usize,
        field_separator: char,
        ignore_empty: bool,
        ignore_lines: Option<Regex>,
        field: Option<Field>,
        order: Order,
        timeout: Option<Duration>,
    ) -> Config {
        Config {
            workers,
            field_separator,
            ignore_empty,
            ignore_lines,
            field,
            order,
            timeout,
        }
    }

    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    pub(crate) fn field_separator(&self) -> char {
        self.field_separator
    }

    pub(crate) fn ignore_empty(&self) -> bool {
        self.ignore_empty
    }

    pub(crate) fn ignore_lines(&self) -> &Option<Regex> {
        &self.ignore_lines
    }

    pub(crate) fn field(&self) -> &Option<Field> {
        &self.field
    }

    pub(crate) fn order(&self) -> &Order {
        &self.order
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
