mod all;
mod defect;
