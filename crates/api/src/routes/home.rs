//! Route Listing

/// Plain-text description of the available routes
pub const ROUTES: &str = "\
Available Routes:
/api/v1.0/precipitation - dictionary of precipitation by date of last year
/api/v1.0/stations - list of stations
/api/v1.0/tobs - list of temperature observations for the most active station
/api/v1.0/<start> - min, max and average temperature from start date (YYYY-MM-DD format)
/api/v1.0/<start>/<end> - min, max and average temperature from start date to end date (YYYY-MM-DD format)
";

pub async fn list_routes() -> &'static str {
    ROUTES
}
