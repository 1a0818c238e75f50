mod headers;

pub use headers::{
    header_binary_numeric, header_iris_like, header_single_class, header_weather_like,
};
