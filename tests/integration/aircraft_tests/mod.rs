mod aerodynamics;
mod simulation;
