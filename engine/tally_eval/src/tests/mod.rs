mod pipeline;
mod reducer;
