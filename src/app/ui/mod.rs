mod composer;
mod panels;
