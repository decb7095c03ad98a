mod chart;
pub use self::chart::{
    ApiFailure, ChartData, ChartEnvelope, ChartMeta, ChartResponse, Indicators, OhlcBar,
    QuoteBlock,
};
