use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;

use crate::forecast::{FittedModel, ForecastError, Forecaster, ModelOptions};
use crate::series::Series;

const DAYS_IN_WEEK: usize = 7;

/// Least-squares linear trend over day offsets, optionally with a centred
/// day-of-week offset learned from the trend residuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendForecaster;

impl TrendForecaster {
    pub fn new() -> Self {
        Self
    }
}

struct TrendModel {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    weekday_offsets: [f64; DAYS_IN_WEEK]
}

impl TrendModel {
    fn offset(&self, date: NaiveDate) -> f64 {
        (date - self.origin).num_days() as f64
    }
}

impl Forecaster for TrendForecaster {
    fn fit(&self, series: &Series, options: &ModelOptions) -> Result<Box<dyn FittedModel>, ForecastError> {
        if series.len() < 2 {
            return Err(ForecastError::Degenerate(format!("[{}] point(s) is not enough to fit a trend", series.len())));
        }

        let origin = series.first_date();
        let mut xs = Vec::with_capacity(series.len());
        let mut ys = Vec::with_capacity(series.len());

        for point in series.points() {
            let value = point.value.to_f64()
                .ok_or_else(|| ForecastError::Degenerate(format!("Value on [{}] is not representable", point.date)))?;

            xs.push((point.date - origin).num_days() as f64);
            ys.push(value);
        }

        let count = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / count;
        let mean_y = ys.iter().sum::<f64>() / count;

        let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
        let sxy: f64 = xs.iter().zip(&ys).map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();

        if sxx == 0.0 {
            return Err(ForecastError::Degenerate("All observations share a single date".to_string()));
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let mut model = TrendModel {
            origin,
            intercept,
            slope,
            weekday_offsets: [0.0; DAYS_IN_WEEK]
        };

        if options.daily_seasonality {
            model.weekday_offsets = weekday_offsets(&model, series, &ys);
        }

        Ok(Box::new(model))
    }
}

fn weekday_offsets(model: &TrendModel, series: &Series, ys: &[f64]) -> [f64; DAYS_IN_WEEK] {
    let mut sums = [0.0; DAYS_IN_WEEK];
    let mut counts = [0usize; DAYS_IN_WEEK];

    for (point, y) in series.points().iter().zip(ys) {
        let weekday = point.date.weekday().num_days_from_monday() as usize;
        let trend = model.intercept + model.slope * model.offset(point.date);

        sums[weekday] += y - trend;
        counts[weekday] += 1;
    }

    let mut offsets = [0.0; DAYS_IN_WEEK];
    let mut observed = 0usize;
    let mut total = 0.0;

    for weekday in 0..DAYS_IN_WEEK {
        if counts[weekday] > 0 {
            offsets[weekday] = sums[weekday] / counts[weekday] as f64;
            total += offsets[weekday];
            observed += 1;
        }
    }

    // Offsets are centred over the observed weekdays; unseen weekdays follow the bare trend.
    let centre = if observed > 0 { total / observed as f64 } else { 0.0 };

    for weekday in 0..DAYS_IN_WEEK {
        if counts[weekday] > 0 {
            offsets[weekday] -= centre;
        }
    }

    offsets
}

impl FittedModel for TrendModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<f64>, ForecastError> {
        dates.iter()
            .map(|date| {
                let weekday = date.weekday().num_days_from_monday() as usize;
                let value = self.intercept + self.slope * self.offset(*date) + self.weekday_offsets[weekday];

                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(ForecastError::NonFinite { date: *date })
                }
            })
            .collect()
    }
}
